//! Procedural test image for the sub-LCD

use brainio_core::traits::PixelSource;

/// Horizontal gray ramp with a black frame
///
/// The four bands land on the four panel gray levels.
pub struct GrayRamp {
    pub width: u16,
    pub height: u16,
    pub inverted: bool,
}

impl PixelSource for GrayRamp {
    fn dimensions(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    fn xrgb(&self, x: u16, y: u16) -> u32 {
        let border = x == 0 || y == 0 || x + 1 == self.width || y + 1 == self.height;
        let gray = if border {
            0
        } else {
            let span = u32::from(self.width.max(1));
            (u32::from(x) * 256 / span).min(255)
        };
        let gray = if self.inverted { 255 - gray } else { gray };
        gray << 16 | gray << 8 | gray
    }
}
