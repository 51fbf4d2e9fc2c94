//! Input events delivered to the host

use crate::traits::InputSink;

/// Linux input event code
///
/// Code 0 (`KEY_RESERVED`) never appears here; unassigned slots are `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyCode(u16);

impl KeyCode {
    /// `KEY_RESERVED`, the unassigned marker in configuration tables
    pub const RESERVED: u16 = 0;

    /// Wrap a code, mapping `KEY_RESERVED` to `None`
    pub const fn new(code: u16) -> Option<Self> {
        if code == Self::RESERVED {
            None
        } else {
            Some(Self(code))
        }
    }

    pub const fn code(self) -> u16 {
        self.0
    }
}

/// Switches exposed to the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Switch {
    Lid,
    TabletMode,
    Dock,
}

impl Switch {
    /// Linux `SW_*` code
    pub const fn code(self) -> u16 {
        match self {
            Self::Lid => 0x00,
            Self::TabletMode => 0x01,
            Self::Dock => 0x05,
        }
    }
}

/// One decoded event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InputEvent {
    Key { code: KeyCode, pressed: bool },
    Switch { switch: Switch, on: bool },
}

impl InputEvent {
    pub const fn key(code: KeyCode, pressed: bool) -> Self {
        Self::Key { code, pressed }
    }

    pub const fn switch(switch: Switch, on: bool) -> Self {
        Self::Switch { switch, on }
    }

    /// Forward this event to a sink
    pub fn report_to<K: InputSink + ?Sized>(&self, sink: &mut K) {
        match *self {
            Self::Key { code, pressed } => sink.report_key(code, pressed),
            Self::Switch { switch, on } => sink.report_switch(switch, on),
        }
    }
}
