//! ST7586 packed pixel words
//!
//! The controller stores three pixels per DDRAM byte: two with a full
//! 3-bit code and one with only the low two bits of its code. Six pixels
//! are packed into one 16-bit word, as two independent byte lanes:
//!
//! ```text
//! bit   15 14 13 | 12 11 10 | 9 8 || 7 6 5 | 4 3 2 | 1 0
//!       ---p2--- | ---p1--- | p0  || --p5- | --p4- | p3
//! ```
//!
//! p0 and p3 are truncated to two bits; the controller grants only two
//! bits to every third pixel.

use super::gray::GrayLevel;

/// Pixels carried by one packed word
pub const PIXELS_PER_WORD: usize = 6;

/// Pixels carried by one DDRAM byte
pub const PIXELS_PER_BYTE: usize = 3;

/// Bit offsets of p0..p5 inside the word
pub const LANE_OFFSETS: [u32; PIXELS_PER_WORD] = [8, 10, 13, 0, 2, 5];

/// Two DDRAM bytes holding six pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PackedWord(pub u16);

impl PackedWord {
    /// Pack six gray levels, scanning left to right
    pub fn pack(levels: [GrayLevel; PIXELS_PER_WORD]) -> Self {
        let mut word = 0u16;
        for (slot, level) in levels.into_iter().enumerate() {
            word |= Self::slot_code(slot, level.panel_code()) << LANE_OFFSETS[slot];
        }
        Self(word)
    }

    /// Code as stored for `slot`: narrow slots keep the low two bits
    #[inline]
    fn slot_code(slot: usize, code: u8) -> u16 {
        if Self::is_narrow(slot) {
            (code & 0b11) as u16
        } else {
            code as u16
        }
    }

    /// Whether `slot` is one of the two-bit pixel positions
    #[inline]
    pub const fn is_narrow(slot: usize) -> bool {
        slot % PIXELS_PER_BYTE == 0
    }

    /// Bytes in DDRAM transfer order
    ///
    /// The word goes out low byte first, which is what a little-endian
    /// store of the u16 into the transfer buffer produces.
    #[inline]
    pub const fn to_bytes(self) -> [u8; 2] {
        self.0.to_le_bytes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Raw code stored at `slot` (2 or 3 bits wide)
    fn slot_bits(word: PackedWord, slot: usize) -> u8 {
        let mask = if PackedWord::is_narrow(slot) { 0b11 } else { 0b111 };
        ((word.0 >> LANE_OFFSETS[slot]) & mask) as u8
    }

    /// Reference unpacker: what the controller shows for each slot
    fn unpack(word: PackedWord) -> [GrayLevel; PIXELS_PER_WORD] {
        let mut out = [GrayLevel::White; PIXELS_PER_WORD];
        for (slot, level) in out.iter_mut().enumerate() {
            let bits = slot_bits(word, slot);
            *level = if PackedWord::is_narrow(slot) {
                // D1 D0 column of the controller table
                match bits {
                    0b11 => GrayLevel::Black,
                    0b10 => GrayLevel::DarkGray,
                    0b01 => GrayLevel::LightGray,
                    _ => GrayLevel::White,
                }
            } else {
                GrayLevel::from_panel_code(bits).unwrap()
            };
        }
        out
    }

    fn level() -> impl Strategy<Value = GrayLevel> {
        prop_oneof![
            Just(GrayLevel::Black),
            Just(GrayLevel::DarkGray),
            Just(GrayLevel::LightGray),
            Just(GrayLevel::White),
        ]
    }

    #[test]
    fn test_all_black_word() {
        let word = PackedWord::pack([GrayLevel::Black; 6]);
        // p0/p3: 0b11, others 0b111
        assert_eq!(word.0, 0b111_111_11_111_111_11);
        assert_eq!(word.to_bytes(), [0xFF, 0xFF]);
    }

    #[test]
    fn test_all_white_word() {
        assert_eq!(PackedWord::pack([GrayLevel::White; 6]).0, 0);
    }

    #[test]
    fn test_lane_positions() {
        use GrayLevel::*;
        // Only p1 dark gray: 0b100 << 10
        let word = PackedWord::pack([White, DarkGray, White, White, White, White]);
        assert_eq!(word.0, 0b100 << 10);
        // Only p5 light gray: 0b010 << 5
        let word = PackedWord::pack([White, White, White, White, White, LightGray]);
        assert_eq!(word.0, 0b010 << 5);
        assert_eq!(word.to_bytes(), [0x40, 0x00]);
        // p0 black is truncated to 0b11 in the high lane
        let word = PackedWord::pack([Black, White, White, White, White, White]);
        assert_eq!(word.to_bytes(), [0x00, 0x03]);
    }

    #[test]
    fn test_narrow_slot_truncation() {
        use GrayLevel::*;
        // Dark gray (0b100) loses its only set bit in a narrow slot
        let word = PackedWord::pack([DarkGray, White, White, DarkGray, White, White]);
        assert_eq!(word.0, 0);
        let shown = unpack(word);
        assert_eq!(shown[0], White);
        assert_eq!(shown[3], White);
    }

    proptest! {
        #[test]
        fn wide_slots_round_trip(levels in proptest::array::uniform6(level())) {
            let shown = unpack(PackedWord::pack(levels));
            for slot in [1, 2, 4, 5] {
                prop_assert_eq!(shown[slot], levels[slot]);
            }
        }

        #[test]
        fn lanes_are_independent(levels in proptest::array::uniform6(level())) {
            let word = PackedWord::pack(levels);
            let mut high_only = levels;
            let mut low_only = levels;
            for slot in 0..3 {
                low_only[slot] = GrayLevel::White;
                high_only[slot + 3] = GrayLevel::White;
            }
            prop_assert_eq!(word.0 & 0xFF00, PackedWord::pack(high_only).0);
            prop_assert_eq!(word.0 & 0x00FF, PackedWord::pack(low_only).0);
        }
    }
}
