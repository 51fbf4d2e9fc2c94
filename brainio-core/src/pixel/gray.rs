//! Grayscale reduction and quantization
//!
//! XRGB8888 source pixels are first reduced to an 8-bit gray value, then
//! the top two bits pick one of the four levels the ST7586 can show.
//!
//! ```text
//! |  D7  |  D6  |  D5  ||      |      || 2bpp |
//! | (D4) | (D3) | (D2) ||  D1  |  D0  || GRAY |
//! +------+------+------++------+------++------+
//! |  1   |  1   |  1   ||  1   |  1   || 0  0 | black
//! |  1   |  0   |  0   ||  1   |  0   || 0  1 | dark gray
//! |  0   |  1   |  0   ||  0   |  1   || 1  0 | light gray
//! |  0   |  0   |  0   ||  0   |  0   || 1  1 | white
//! ```

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Weighted RGB to gray8 reduction
///
/// `gray = (r * red + g * green + b * blue) / divisor`. The weights must
/// sum to `divisor` so that full white maps to 255.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LumaWeights {
    pub red: u16,
    pub green: u16,
    pub blue: u16,
    pub divisor: u16,
}

impl LumaWeights {
    /// Integer BT.601 approximation used by the kernel's
    /// `drm_fb_xrgb8888_to_gray8`: (3R + 6G + B) / 10
    pub const DRM_GRAY8: Self = Self {
        red: 3,
        green: 6,
        blue: 1,
        divisor: 10,
    };

    /// Plain channel average: (R + G + B) / 3
    pub const EQUAL: Self = Self {
        red: 1,
        green: 1,
        blue: 1,
        divisor: 3,
    };

    /// Reduce one XRGB8888 pixel to 8-bit gray (the X byte is ignored)
    #[inline]
    pub fn gray8(&self, xrgb: u32) -> u8 {
        let r = (xrgb >> 16) & 0xFF;
        let g = (xrgb >> 8) & 0xFF;
        let b = xrgb & 0xFF;
        let sum = r * self.red as u32 + g * self.green as u32 + b * self.blue as u32;
        let gray = sum / self.divisor.max(1) as u32;
        gray.min(0xFF) as u8
    }
}

impl Default for LumaWeights {
    fn default() -> Self {
        Self::DRM_GRAY8
    }
}

/// One of the four panel gray levels, darkest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GrayLevel {
    Black = 0,
    DarkGray = 1,
    LightGray = 2,
    White = 3,
}

/// 3-bit panel codes indexed by gray level
const PANEL_CODES: [u8; 4] = [0b111, 0b100, 0b010, 0b000];

impl GrayLevel {
    /// All levels, darkest first
    pub const ALL: [GrayLevel; 4] = [
        GrayLevel::Black,
        GrayLevel::DarkGray,
        GrayLevel::LightGray,
        GrayLevel::White,
    ];

    /// Quantize a gray8 value by its top two bits
    #[inline]
    pub const fn quantize(gray: u8) -> Self {
        match gray >> 6 {
            0 => GrayLevel::Black,
            1 => GrayLevel::DarkGray,
            2 => GrayLevel::LightGray,
            _ => GrayLevel::White,
        }
    }

    /// Full 3-bit code for a wide pixel slot
    #[inline]
    pub const fn panel_code(self) -> u8 {
        PANEL_CODES[self as usize]
    }

    /// Level shown for a 3-bit code, if it is one of the four valid codes
    pub fn from_panel_code(code: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|level| level.panel_code() == code)
    }
}

/// Reduce and quantize one XRGB8888 pixel
#[inline]
pub fn quantize_xrgb(weights: &LumaWeights, xrgb: u32) -> GrayLevel {
    GrayLevel::quantize(weights.gray8(xrgb))
}
