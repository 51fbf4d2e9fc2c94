//! Keyboard configuration surface
//!
//! A keymap is an ordered list of `(raw, normal, symbol)` triples. Raw
//! keycodes index a 64-slot table; event codes are Linux input codes with
//! 0 (`KEY_RESERVED`) meaning "unassigned".

use heapless::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Symbol-trigger raw keycode used when none is configured
pub const DEFAULT_SYMBOL_KEYCODE: u8 = 0x19;

/// Maximum keymap triples per config
pub const MAX_KEYMAP_ENTRIES: usize = 128;

/// Configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// No keymap table was supplied
    MissingKeymap,
    /// Raw keycode does not fit the 64-slot table
    KeycodeOutOfRange(u8),
    /// Symbol-trigger keycode does not fit the 64-slot table
    SymbolKeycodeOutOfRange(u8),
}

/// One keymap line: raw scan key and its two event codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct KeymapTriple {
    /// Raw keycode (0-63)
    pub raw: u8,
    /// Event code outside symbol mode (0 = unassigned)
    pub normal: u16,
    /// Event code in symbol mode (0 = unassigned)
    pub symbol: u16,
}

impl KeymapTriple {
    pub const fn new(raw: u8, normal: u16, symbol: u16) -> Self {
        Self {
            raw,
            normal,
            symbol,
        }
    }
}

/// Complete keyboard configuration
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct KeyboardConfig {
    /// Raw keycode of the symbol modifier, [`DEFAULT_SYMBOL_KEYCODE`] if unset
    pub symbol_keycode: Option<u8>,
    /// Keymap lines, applied in order (later lines win)
    pub keymap: Vec<KeymapTriple, MAX_KEYMAP_ENTRIES>,
}

impl KeyboardConfig {
    /// Build a config from a static table
    ///
    /// Lines past [`MAX_KEYMAP_ENTRIES`] are dropped with a warning.
    pub fn from_table(symbol_keycode: Option<u8>, table: &[KeymapTriple]) -> Self {
        if table.len() > MAX_KEYMAP_ENTRIES {
            warn!(
                "Keymap table has {} lines, dropping {} past {}",
                table.len(),
                table.len() - MAX_KEYMAP_ENTRIES,
                MAX_KEYMAP_ENTRIES
            );
        }
        let len = table.len().min(MAX_KEYMAP_ENTRIES);
        let mut keymap = Vec::new();
        // Cannot fail: len is bounded by capacity
        let _ = keymap.extend_from_slice(&table[..len]);
        Self {
            symbol_keycode,
            keymap,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_table_keeps_order() {
        let table = [
            KeymapTriple::new(0x01, 30, 2),
            KeymapTriple::new(0x01, 31, 0),
        ];
        let config = KeyboardConfig::from_table(None, &table);
        assert_eq!(config.symbol_keycode, None);
        assert_eq!(config.keymap.as_slice(), &table);
    }

    #[test]
    fn test_from_table_drops_overflow() {
        let mut table = [KeymapTriple::new(0x02, 48, 0); MAX_KEYMAP_ENTRIES + 3];
        table[MAX_KEYMAP_ENTRIES - 1] = KeymapTriple::new(0x03, 46, 0);
        table[MAX_KEYMAP_ENTRIES] = KeymapTriple::new(0x04, 32, 0);

        let config = KeyboardConfig::from_table(Some(0x19), &table);
        assert_eq!(config.keymap.len(), MAX_KEYMAP_ENTRIES);
        assert_eq!(config.keymap.last(), Some(&KeymapTriple::new(0x03, 46, 0)));
    }
}
