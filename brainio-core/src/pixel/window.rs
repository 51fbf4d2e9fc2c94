//! DDRAM addressing windows
//!
//! Columns address whole DDRAM bytes (three pixels), pages address rows.
//! The visible panel starts at a fixed page offset inside DDRAM.

use core::ops::Range;

use super::region::PixelRegion;
use super::word::PIXELS_PER_BYTE;

/// Column/page rectangle in DDRAM, both ranges half-open
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AddressWindow {
    pub col_start: u16,
    pub col_end: u16,
    pub page_start: u16,
    pub page_end: u16,
}

impl AddressWindow {
    pub const fn columns(&self) -> Range<u16> {
        self.col_start..self.col_end
    }

    pub const fn pages(&self) -> Range<u16> {
        self.page_start..self.page_end
    }

    /// Bytes covered by the window
    pub const fn len(&self) -> usize {
        let cols = self.col_end.saturating_sub(self.col_start) as usize;
        let pages = self.page_end.saturating_sub(self.page_start) as usize;
        cols * pages
    }

    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Windows for the top and bottom DDRAM halves of one update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DdramWindows {
    pub top: AddressWindow,
    pub bottom: AddressWindow,
}

impl DdramWindows {
    /// Windows for a column-aligned, even-height region
    ///
    /// The top half covers the first `height / 2` rows of the region and
    /// the bottom half the rest, both shifted by `page_offset`.
    pub fn for_region(region: &PixelRegion, page_offset: u16) -> Self {
        let step = PIXELS_PER_BYTE as u16;
        let col_start = region.x1 / step;
        let col_end = region.x2 / step;
        let split = region.y1 + region.height() / 2;

        Self {
            top: AddressWindow {
                col_start,
                col_end,
                page_start: page_offset + region.y1,
                page_end: page_offset + split,
            },
            bottom: AddressWindow {
                col_start,
                col_end,
                page_start: page_offset + split,
                page_end: page_offset + region.y2,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_panel_windows() {
        let w = DdramWindows::for_region(&PixelRegion::full(240, 120), 0x28);
        assert_eq!(w.top.columns(), 0..80);
        assert_eq!(w.top.pages(), 0x28..0x28 + 60);
        assert_eq!(w.bottom.columns(), 0..80);
        assert_eq!(w.bottom.pages(), 0x28 + 60..0x28 + 120);
        assert_eq!(w.top.len(), 4800);
        assert_eq!(w.bottom.len(), 4800);
    }

    #[test]
    fn test_offset_region_windows() {
        let w = DdramWindows::for_region(&PixelRegion::new(6, 10, 15, 14), 0x28);
        assert_eq!(w.top.columns(), 2..5);
        assert_eq!(w.top.pages(), 0x32..0x34);
        assert_eq!(w.bottom.pages(), 0x34..0x36);
        assert_eq!(w.top.len(), PixelRegion::new(6, 10, 15, 14).packed_len() / 2);
    }
}
