//! Rectangular update regions

use super::word::{PIXELS_PER_BYTE, PIXELS_PER_WORD};

/// Why a region cannot be packed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RegionError {
    /// x2 < x1 or y2 < y1
    Inverted,
    /// x-bounds do not fall on packed word boundaries (six pixels)
    UnalignedWidth,
    /// Height cannot be split into two equal DDRAM halves
    OddHeight,
    /// Region extends past the source image
    OutOfBounds,
}

/// Half-open pixel rectangle `[x1, x2) × [y1, y2)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PixelRegion {
    pub x1: u16,
    pub y1: u16,
    pub x2: u16,
    pub y2: u16,
}

impl PixelRegion {
    /// Create a region from its corners
    pub const fn new(x1: u16, y1: u16, x2: u16, y2: u16) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Region covering a whole `width × height` image
    pub const fn full(width: u16, height: u16) -> Self {
        Self::new(0, 0, width, height)
    }

    pub const fn width(&self) -> u16 {
        self.x2.saturating_sub(self.x1)
    }

    pub const fn height(&self) -> u16 {
        self.y2.saturating_sub(self.y1)
    }

    pub const fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// Grow the x-bounds outward to whole packed words
    ///
    /// x1 is rounded down and x2 up to the nearest multiple of six, so
    /// every DDRAM column pair is written whole. x2 is then clamped to
    /// `max_width` (a multiple of six on every supported panel).
    pub fn align_columns(self, max_width: u16) -> Self {
        let step = PIXELS_PER_WORD as u16;
        let x1 = self.x1 - self.x1 % step;
        let x2 = match self.x2 % step {
            0 => self.x2,
            rem => self.x2.saturating_add(step - rem),
        };
        Self {
            x1,
            x2: x2.min(max_width),
            ..self
        }
    }

    /// Check the region can be packed from a `width × height` source
    pub fn validate(&self, width: u16, height: u16) -> Result<(), RegionError> {
        if self.x2 < self.x1 || self.y2 < self.y1 {
            return Err(RegionError::Inverted);
        }
        if self.x2 > width || self.y2 > height {
            return Err(RegionError::OutOfBounds);
        }
        if self.x1 as usize % PIXELS_PER_WORD != 0
            || self.width() as usize % PIXELS_PER_WORD != 0
        {
            return Err(RegionError::UnalignedWidth);
        }
        if self.height() % 2 != 0 {
            return Err(RegionError::OddHeight);
        }
        Ok(())
    }

    /// DDRAM bytes needed to hold the packed region
    pub const fn packed_len(&self) -> usize {
        (self.width() as usize / PIXELS_PER_BYTE) * self.height() as usize
    }
}
