//! Keymap table
//!
//! 64 fixed slots indexed by raw key id. Bounds are checked once when the
//! table is built; decoding indexes without further checks.

use heapless::Vec;

use crate::config::{ConfigError, KeyboardConfig, KeymapTriple, DEFAULT_SYMBOL_KEYCODE};

use super::events::KeyCode;

/// Number of raw key slots
pub const KEY_SLOTS: usize = 64;

/// Upper bound on distinct codes a keymap can emit
pub const MAX_CAPABILITIES: usize = KEY_SLOTS * 2;

/// Event codes for one raw key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeymapEntry {
    pub normal: Option<KeyCode>,
    pub symbol: Option<KeyCode>,
}

impl KeymapEntry {
    pub const UNASSIGNED: Self = Self {
        normal: None,
        symbol: None,
    };

    pub const fn is_unassigned(&self) -> bool {
        self.normal.is_none() && self.symbol.is_none()
    }
}

/// Validated raw-key → event-code table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keymap {
    entries: [KeymapEntry; KEY_SLOTS],
    symbol_keycode: u8,
}

impl Keymap {
    /// Build from a [`KeyboardConfig`]
    ///
    /// Out-of-range lines are logged and skipped. An empty table is an error.
    pub fn from_config(config: &KeyboardConfig) -> Result<Self, ConfigError> {
        let mut builder = KeymapBuilder::new();
        if let Some(symbol) = config.symbol_keycode {
            builder.symbol_keycode(symbol)?;
        }
        for triple in &config.keymap {
            // Rejections are logged by the builder and do not abort the load
            let _ = builder.add(*triple);
        }
        builder.build()
    }

    /// Entry for a raw key id (upper bits are ignored)
    pub fn entry(&self, key: u8) -> &KeymapEntry {
        &self.entries[usize::from(key) % KEY_SLOTS]
    }

    /// Raw key id of the symbol modifier
    pub const fn symbol_keycode(&self) -> u8 {
        self.symbol_keycode
    }

    /// Distinct codes this keymap can emit, normal codes first
    pub fn capabilities(&self) -> Vec<KeyCode, MAX_CAPABILITIES> {
        let mut caps: Vec<KeyCode, MAX_CAPABILITIES> = Vec::new();
        let normals = self.entries.iter().filter_map(|e| e.normal);
        let symbols = self.entries.iter().filter_map(|e| e.symbol);
        for code in normals.chain(symbols) {
            if !caps.contains(&code) {
                // At most two codes per slot, so capacity suffices
                let _ = caps.push(code);
            }
        }
        caps
    }
}

/// Incremental keymap construction
///
/// Accepts both the triple form and the separate normal/symbol list form.
/// Later assignments to the same slot win.
#[derive(Debug, Clone)]
pub struct KeymapBuilder {
    entries: [KeymapEntry; KEY_SLOTS],
    symbol_keycode: u8,
    offered: usize,
    rejected: usize,
}

impl Default for KeymapBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl KeymapBuilder {
    pub const fn new() -> Self {
        Self {
            entries: [KeymapEntry::UNASSIGNED; KEY_SLOTS],
            symbol_keycode: DEFAULT_SYMBOL_KEYCODE,
            offered: 0,
            rejected: 0,
        }
    }

    /// Override the symbol modifier key
    pub fn symbol_keycode(&mut self, raw: u8) -> Result<&mut Self, ConfigError> {
        if usize::from(raw) >= KEY_SLOTS {
            error!("Invalid symbol keycode {}", raw);
            return Err(ConfigError::SymbolKeycodeOutOfRange(raw));
        }
        self.symbol_keycode = raw;
        Ok(self)
    }

    /// Add one triple (0 codes leave the slot unassigned)
    pub fn add(&mut self, triple: KeymapTriple) -> Result<&mut Self, ConfigError> {
        let slot = self.slot(triple.raw)?;
        *slot = KeymapEntry {
            normal: KeyCode::new(triple.normal),
            symbol: KeyCode::new(triple.symbol),
        };
        Ok(self)
    }

    /// Set the normal-mode code of one slot
    pub fn set_normal(&mut self, raw: u8, code: u16) -> Result<&mut Self, ConfigError> {
        self.slot(raw)?.normal = KeyCode::new(code);
        Ok(self)
    }

    /// Set the symbol-mode code of one slot
    pub fn set_symbol(&mut self, raw: u8, code: u16) -> Result<&mut Self, ConfigError> {
        self.slot(raw)?.symbol = KeyCode::new(code);
        Ok(self)
    }

    /// Lines rejected so far
    pub const fn rejected(&self) -> usize {
        self.rejected
    }

    /// Finish the table
    pub fn build(&self) -> Result<Keymap, ConfigError> {
        if self.offered == 0 {
            error!("No keymap found");
            return Err(ConfigError::MissingKeymap);
        }
        if self.rejected > 0 {
            warn!("{} keymap lines rejected", self.rejected);
        }
        Ok(Keymap {
            entries: self.entries,
            symbol_keycode: self.symbol_keycode,
        })
    }

    fn slot(&mut self, raw: u8) -> Result<&mut KeymapEntry, ConfigError> {
        self.offered += 1;
        if usize::from(raw) >= KEY_SLOTS {
            error!("Invalid keycode {}", raw);
            self.rejected += 1;
            return Err(ConfigError::KeycodeOutOfRange(raw));
        }
        Ok(&mut self.entries[usize::from(raw)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY_A: u16 = 30;
    const KEY_1: u16 = 2;
    const KEY_B: u16 = 48;

    fn code(c: u16) -> Option<KeyCode> {
        KeyCode::new(c)
    }

    #[test]
    fn test_from_config() {
        let config = KeyboardConfig::from_table(
            None,
            &[KeymapTriple::new(0x01, KEY_A, KEY_1), KeymapTriple::new(0x02, KEY_B, 0)],
        );
        let keymap = Keymap::from_config(&config).unwrap();

        assert_eq!(keymap.symbol_keycode(), DEFAULT_SYMBOL_KEYCODE);
        assert_eq!(keymap.entry(0x01).normal, code(KEY_A));
        assert_eq!(keymap.entry(0x01).symbol, code(KEY_1));
        assert_eq!(keymap.entry(0x02).symbol, None);
        assert!(keymap.entry(0x03).is_unassigned());
    }

    #[test]
    fn test_empty_keymap_is_fatal() {
        let config = KeyboardConfig::default();
        assert_eq!(Keymap::from_config(&config), Err(ConfigError::MissingKeymap));
    }

    #[test]
    fn test_out_of_range_line_skipped() {
        let config = KeyboardConfig::from_table(
            Some(0x20),
            &[KeymapTriple::new(64, KEY_A, 0), KeymapTriple::new(0x05, KEY_B, 0)],
        );
        let keymap = Keymap::from_config(&config).unwrap();
        assert_eq!(keymap.symbol_keycode(), 0x20);
        assert_eq!(keymap.entry(0x05).normal, code(KEY_B));
        // 64 wraps to slot 0, which must stay untouched
        assert!(keymap.entry(0).is_unassigned());
    }

    #[test]
    fn test_symbol_keycode_out_of_range() {
        let config = KeyboardConfig::from_table(Some(0x40), &[KeymapTriple::new(1, KEY_A, 0)]);
        assert_eq!(
            Keymap::from_config(&config),
            Err(ConfigError::SymbolKeycodeOutOfRange(0x40))
        );
    }

    #[test]
    fn test_later_line_wins() {
        let config = KeyboardConfig::from_table(
            None,
            &[KeymapTriple::new(1, KEY_A, 0), KeymapTriple::new(1, KEY_B, KEY_1)],
        );
        let keymap = Keymap::from_config(&config).unwrap();
        assert_eq!(keymap.entry(1).normal, code(KEY_B));
        assert_eq!(keymap.entry(1).symbol, code(KEY_1));
    }

    #[test]
    fn test_two_list_form() {
        let mut builder = KeymapBuilder::new();
        builder.set_normal(1, KEY_A).unwrap();
        builder.set_normal(2, KEY_B).unwrap();
        builder.set_symbol(1, KEY_1).unwrap();
        assert_eq!(builder.set_symbol(70, KEY_1).err(), Some(ConfigError::KeycodeOutOfRange(70)));
        assert_eq!(builder.rejected(), 1);

        let keymap = builder.build().unwrap();
        assert_eq!(keymap.entry(1).symbol, code(KEY_1));
        assert_eq!(keymap.entry(2).symbol, None);
    }

    #[test]
    fn test_capabilities_distinct() {
        let config = KeyboardConfig::from_table(
            None,
            &[
                KeymapTriple::new(1, KEY_A, KEY_1),
                KeymapTriple::new(2, KEY_B, KEY_A),
                KeymapTriple::new(3, 0, KEY_1),
            ],
        );
        let keymap = Keymap::from_config(&config).unwrap();
        let caps = keymap.capabilities();
        assert_eq!(caps.len(), 3);
        assert!(caps.contains(&KeyCode::new(KEY_A).unwrap()));
        assert!(caps.contains(&KeyCode::new(KEY_B).unwrap()));
        assert!(caps.contains(&KeyCode::new(KEY_1).unwrap()));
    }
}
