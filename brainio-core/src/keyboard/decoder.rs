//! Key decoder state machine
//!
//! Turns one raw scan byte into zero, one or two [`InputEvent`]s. The
//! decoder owns all per-device state: the symbol modifier, the lid
//! direction, and which mapping each key was last reported under.
//!
//! When a held key changes mapping (symbol modifier pressed or released
//! while the key is down), the release of the previous mapping is
//! synthesized and delivered before the new event, so the host never
//! sees a code stuck down.

use heapless::Vec;

use super::events::{InputEvent, Switch};
use super::keymap::{Keymap, KEY_SLOTS};
use super::scancode::{ScanCode, ScanKind, SwitchId};

/// Most events one scan byte can produce
pub const MAX_EVENTS_PER_CODE: usize = 2;

/// Events produced by one consumed scan byte, in delivery order
pub type Decoded = Vec<InputEvent, MAX_EVENTS_PER_CODE>;

/// Per-device decoder state
#[derive(Debug, Clone)]
pub struct KeyDecoder {
    symbol_mode: bool,
    closing: bool,
    /// Key was last pressed under its symbol mapping
    symbol_shadow: [bool; KEY_SLOTS],
    /// Key's normal mapping is currently reported as pressed
    normal_held: [bool; KEY_SLOTS],
}

impl Default for KeyDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyDecoder {
    pub const fn new() -> Self {
        Self {
            symbol_mode: false,
            closing: false,
            symbol_shadow: [false; KEY_SLOTS],
            normal_held: [false; KEY_SLOTS],
        }
    }

    /// Return to the power-on state
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Symbol modifier currently held
    pub const fn symbol_mode(&self) -> bool {
        self.symbol_mode
    }

    /// Lid last seen moving towards closed
    pub const fn closing(&self) -> bool {
        self.closing
    }

    /// Key was last pressed under its symbol mapping
    pub fn is_shifted(&self, key: u8) -> bool {
        self.symbol_shadow[usize::from(key) % KEY_SLOTS]
    }

    /// Decode one raw byte
    ///
    /// Returns `None` when the byte is not handled (unknown switch, unmapped
    /// key). State is left untouched in that case.
    pub fn decode(&mut self, keymap: &Keymap, raw: u8) -> Option<Decoded> {
        match ScanCode(raw).kind() {
            ScanKind::Switch { id, on } => self.decode_switch(id, on),
            ScanKind::Key { key, pressed } => self.decode_key(keymap, key, pressed),
        }
    }

    fn decode_switch(&mut self, id: SwitchId, on: bool) -> Option<Decoded> {
        let mut events = Decoded::new();
        match id {
            SwitchId::TransformingToTablet => {
                if !on {
                    self.closing = false;
                }
            }
            SwitchId::TransformingToClosed => {
                if on {
                    self.closing = true;
                }
            }
            SwitchId::FullyTransformed => {
                let switch = if self.closing {
                    Switch::Lid
                } else {
                    Switch::TabletMode
                };
                push(&mut events, InputEvent::switch(switch, on));
            }
            SwitchId::UsbVbus => push(&mut events, InputEvent::switch(Switch::Dock, on)),
            SwitchId::Other(raw) => {
                debug!("Unknown switch: id={}, on={}", raw, on);
                return None;
            }
        }
        Some(events)
    }

    fn decode_key(&mut self, keymap: &Keymap, key: u8, pressed: bool) -> Option<Decoded> {
        if key == keymap.symbol_keycode() {
            self.symbol_mode = pressed;
            return Some(Decoded::new());
        }

        let k = usize::from(key);
        let entry = keymap.entry(key);
        if entry.is_unassigned() {
            return None;
        }

        let mut events = Decoded::new();
        if self.symbol_mode {
            let symbol = entry.symbol?;
            if !self.symbol_shadow[k] && self.normal_held[k] {
                if let Some(normal) = entry.normal {
                    push(&mut events, InputEvent::key(normal, false));
                }
                self.normal_held[k] = false;
            }
            push(&mut events, InputEvent::key(symbol, pressed));
            self.symbol_shadow[k] = pressed;
        } else {
            let normal = entry.normal?;
            if self.symbol_shadow[k] {
                if let Some(symbol) = entry.symbol {
                    push(&mut events, InputEvent::key(symbol, false));
                }
            }
            push(&mut events, InputEvent::key(normal, pressed));
            self.symbol_shadow[k] = false;
            self.normal_held[k] = pressed;
        }
        Some(events)
    }
}

fn push(events: &mut Decoded, event: InputEvent) {
    // Capacity covers one synthesized release plus the main event
    let _ = events.push(event);
}
