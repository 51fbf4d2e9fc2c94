//! Panel geometry

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::pixel::{PixelRegion, PIXELS_PER_BYTE};

/// Fixed per-model panel geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PanelGeometry {
    /// Visible width in pixels (multiple of 6)
    pub width: u16,
    /// Visible height in pixels (even)
    pub height: u16,
    /// First DDRAM page of the visible area
    pub page_offset: u16,
}

impl PanelGeometry {
    /// SHARP Brain 2nd generation sub-LCD
    pub const BRAIN_SUBLCD: Self = Self {
        width: 240,
        height: 120,
        page_offset: 0x28,
    };

    /// Region covering the whole panel
    pub const fn full_region(&self) -> PixelRegion {
        PixelRegion::full(self.width, self.height)
    }

    /// Packed bytes for a full-panel update
    pub const fn frame_len(&self) -> usize {
        self.width as usize / PIXELS_PER_BYTE * self.height as usize
    }
}

impl Default for PanelGeometry {
    fn default() -> Self {
        Self::BRAIN_SUBLCD
    }
}

/// Transfer buffer size for a full Brain sub-LCD frame
pub const BRAIN_SUBLCD_FRAME_LEN: usize = PanelGeometry::BRAIN_SUBLCD.frame_len();

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_brain_frame_len() {
        assert_eq!(BRAIN_SUBLCD_FRAME_LEN, 9600);
        assert_eq!(
            PanelGeometry::BRAIN_SUBLCD.full_region().packed_len(),
            BRAIN_SUBLCD_FRAME_LEN
        );
    }
}
