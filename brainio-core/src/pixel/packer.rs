//! XRGB8888 to ST7586 DDRAM packing
//!
//! Each row is packed on its own, six pixels per word, so a word never
//! spans two DDRAM pages. The packed stream is split at the middle row
//! into the bytes for the top and the bottom DDRAM half.

use super::gray::{quantize_xrgb, GrayLevel, LumaWeights};
use super::region::{PixelRegion, RegionError};
use super::word::{PackedWord, PIXELS_PER_WORD};
use crate::traits::PixelSource;

/// Packing errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PackError {
    /// Region cannot be packed as given
    InvalidRegion(RegionError),
    /// Scratch buffer too small for the packed region
    OutOfMemory { needed: usize, available: usize },
}

impl From<RegionError> for PackError {
    fn from(e: RegionError) -> Self {
        PackError::InvalidRegion(e)
    }
}

/// Packed region, split into the two DDRAM halves
///
/// Both halves have the same length: `(width / 3) * (height / 2)` bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackedFrame<'a> {
    pub top: &'a [u8],
    pub bottom: &'a [u8],
}

/// Pack `region` of `source` into `scratch`
///
/// The region must already be aligned to whole packed words (see
/// [`PixelRegion::align_columns`]) and have an even height. Nothing is
/// written to `scratch` unless the whole region fits.
pub fn pack<'a, S>(
    region: &PixelRegion,
    source: &S,
    weights: &LumaWeights,
    scratch: &'a mut [u8],
) -> Result<PackedFrame<'a>, PackError>
where
    S: PixelSource + ?Sized,
{
    let (width, height) = source.dimensions();
    region.validate(width, height)?;

    let needed = region.packed_len();
    if scratch.len() < needed {
        return Err(PackError::OutOfMemory {
            needed,
            available: scratch.len(),
        });
    }

    let out = &mut scratch[..needed];
    let mut pos = 0;

    for y in region.y1..region.y2 {
        for x in (region.x1..region.x2).step_by(PIXELS_PER_WORD) {
            let chunk: [GrayLevel; PIXELS_PER_WORD] =
                core::array::from_fn(|i| quantize_xrgb(weights, source.xrgb(x + i as u16, y)));
            out[pos..pos + 2].copy_from_slice(&PackedWord::pack(chunk).to_bytes());
            pos += 2;
        }
    }
    debug_assert_eq!(pos, needed);

    let scratch: &'a [u8] = scratch;
    let (top, bottom) = scratch[..needed].split_at(needed / 2);
    Ok(PackedFrame { top, bottom })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pixel::XrgbBuffer;
    use proptest::prelude::*;

    const BLACK: u32 = 0x0000_0000;
    const WHITE: u32 = 0x00FF_FFFF;
    const DARK: u32 = 0x0050_5050; // gray8 0x50 -> DarkGray
    const LIGHT: u32 = 0x00A0_A0A0; // gray8 0xA0 -> LightGray

    #[test]
    fn test_pack_6x2_is_one_word_per_row() {
        use GrayLevel::*;
        let data = [
            BLACK, DARK, LIGHT, WHITE, LIGHT, BLACK, // row 0
            WHITE, WHITE, BLACK, DARK, DARK, LIGHT, // row 1
        ];
        let img = XrgbBuffer::new(&data, 6, 2).unwrap();
        let mut scratch = [0u8; 8];

        let frame = pack(
            &PixelRegion::full(6, 2),
            &img,
            &LumaWeights::DRM_GRAY8,
            &mut scratch,
        )
        .unwrap();

        let row0 = PackedWord::pack([Black, DarkGray, LightGray, White, LightGray, Black]);
        let row1 = PackedWord::pack([White, White, Black, DarkGray, DarkGray, LightGray]);
        assert_eq!(frame.top, &row0.to_bytes());
        assert_eq!(frame.bottom, &row1.to_bytes());
    }

    #[test]
    fn test_rows_never_share_a_word() {
        // Row 0 black, row 1 white: each half must be uniform
        let mut data = [WHITE; 24];
        data[..12].fill(BLACK);
        let img = XrgbBuffer::new(&data, 12, 2).unwrap();
        let mut scratch = [0u8; 8];

        let frame = pack(
            &PixelRegion::full(12, 2),
            &img,
            &LumaWeights::DRM_GRAY8,
            &mut scratch,
        )
        .unwrap();
        assert_eq!(frame.top, &[0xFF; 4]);
        assert_eq!(frame.bottom, &[0x00; 4]);
    }

    #[test]
    fn test_rejects_half_word_region() {
        let data = [WHITE; 24];
        let img = XrgbBuffer::new(&data, 12, 2).unwrap();
        let mut scratch = [0u8; 8];
        for region in [PixelRegion::new(0, 0, 3, 2), PixelRegion::new(3, 0, 9, 2)] {
            assert_eq!(
                pack(&region, &img, &LumaWeights::DRM_GRAY8, &mut scratch),
                Err(PackError::InvalidRegion(RegionError::UnalignedWidth))
            );
        }
    }

    #[test]
    fn test_pack_subregion_offsets() {
        // 12x4 image, black everywhere except a white 6x2 block at (6, 2)
        let mut data = [BLACK; 48];
        for y in 2..4 {
            for x in 6..12 {
                data[y * 12 + x] = WHITE;
            }
        }
        let img = XrgbBuffer::new(&data, 12, 4).unwrap();
        let mut scratch = [0xAAu8; 4];

        let frame = pack(
            &PixelRegion::new(6, 2, 12, 4),
            &img,
            &LumaWeights::DRM_GRAY8,
            &mut scratch,
        )
        .unwrap();
        assert_eq!(frame.top, &[0x00, 0x00]);
        assert_eq!(frame.bottom, &[0x00, 0x00]);
    }

    #[test]
    fn test_rejects_unaligned_width() {
        let data = [WHITE; 8];
        let img = XrgbBuffer::new(&data, 4, 2).unwrap();
        let mut scratch = [0u8; 8];
        let result = pack(
            &PixelRegion::full(4, 2),
            &img,
            &LumaWeights::DRM_GRAY8,
            &mut scratch,
        );
        assert_eq!(
            result,
            Err(PackError::InvalidRegion(RegionError::UnalignedWidth))
        );
    }

    #[test]
    fn test_rejects_odd_height() {
        let data = [WHITE; 18];
        let img = XrgbBuffer::new(&data, 6, 3).unwrap();
        let mut scratch = [0u8; 8];
        let result = pack(
            &PixelRegion::full(6, 3),
            &img,
            &LumaWeights::DRM_GRAY8,
            &mut scratch,
        );
        assert_eq!(result, Err(PackError::InvalidRegion(RegionError::OddHeight)));
    }

    #[test]
    fn test_small_scratch_leaves_buffer_untouched() {
        let data = [BLACK; 12];
        let img = XrgbBuffer::new(&data, 6, 2).unwrap();
        let mut scratch = [0x5Au8; 3];
        let result = pack(
            &PixelRegion::full(6, 2),
            &img,
            &LumaWeights::DRM_GRAY8,
            &mut scratch,
        );
        assert_eq!(
            result,
            Err(PackError::OutOfMemory {
                needed: 4,
                available: 3
            })
        );
        assert_eq!(scratch, [0x5A; 3]);
    }

    #[test]
    fn test_empty_region() {
        let data = [WHITE; 12];
        let img = XrgbBuffer::new(&data, 6, 2).unwrap();
        let mut scratch = [0u8; 0];
        let frame = pack(
            &PixelRegion::new(6, 0, 6, 2),
            &img,
            &LumaWeights::DRM_GRAY8,
            &mut scratch,
        )
        .unwrap();
        assert!(frame.top.is_empty() && frame.bottom.is_empty());
    }

    proptest! {
        #[test]
        fn halves_have_documented_size(words in 1u16..=4, half_rows in 1u16..=5, seed in any::<u32>()) {
            let (w, h) = (words * 6, half_rows * 2);
            let mut data = [0u32; 24 * 10];
            for (i, px) in data.iter_mut().enumerate() {
                *px = seed.wrapping_mul(i as u32 + 1);
            }
            let img = XrgbBuffer::new(&data, w, h).unwrap();
            let mut scratch = [0u8; 80];

            let frame = pack(&PixelRegion::full(w, h), &img, &LumaWeights::DRM_GRAY8, &mut scratch).unwrap();
            let half = words as usize * 2 * half_rows as usize;
            prop_assert_eq!(frame.top.len(), half);
            prop_assert_eq!(frame.bottom.len(), half);
        }

        #[test]
        fn packing_is_deterministic(seed in any::<u32>()) {
            let mut data = [0u32; 36];
            for (i, px) in data.iter_mut().enumerate() {
                *px = seed.rotate_left(i as u32) ^ (i as u32 * 0x0101_0101);
            }
            let img = XrgbBuffer::new(&data, 6, 6).unwrap();
            let (mut a, mut b) = ([0u8; 12], [0xFFu8; 12]);
            let region = PixelRegion::full(6, 6);
            let fa = pack(&region, &img, &LumaWeights::EQUAL, &mut a).unwrap();
            let fb = pack(&region, &img, &LumaWeights::EQUAL, &mut b).unwrap();
            prop_assert_eq!(fa, fb);
        }
    }
}
