//! Raw scan byte layout
//!
//! ```text
//! switch:  1 . i i i i i s    i = switch id, s = 0 when on
//! key:     0 r k k k k k k    r = 1 on release, k = key id
//! ```

/// Raw byte read from the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScanCode(pub u8);

/// Decoded shape of a scan byte
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ScanKind {
    Switch { id: SwitchId, on: bool },
    Key { key: u8, pressed: bool },
}

impl ScanCode {
    /// "No key" marker in the first slot of a sequence
    pub const NONE: u8 = 0x00;

    const SWITCH_FLAG: u8 = 0x80;
    const RELEASE_FLAG: u8 = 0x40;
    const KEY_MASK: u8 = 0x3F;

    pub const fn is_switch(self) -> bool {
        self.0 & Self::SWITCH_FLAG != 0
    }

    /// Key id (0-63), meaningful for key bytes
    pub const fn key(self) -> u8 {
        self.0 & Self::KEY_MASK
    }

    pub const fn is_pressed(self) -> bool {
        self.0 & Self::RELEASE_FLAG == 0
    }

    pub const fn switch_id(self) -> SwitchId {
        SwitchId::from_raw((self.0 >> 1) & 0x1F)
    }

    pub const fn switch_on(self) -> bool {
        self.0 & 0x01 == 0
    }

    pub const fn kind(self) -> ScanKind {
        if self.is_switch() {
            ScanKind::Switch {
                id: self.switch_id(),
                on: self.switch_on(),
            }
        } else {
            ScanKind::Key {
                key: self.key(),
                pressed: self.is_pressed(),
            }
        }
    }
}

/// Switch identifiers reported by the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SwitchId {
    /// Lid moving from closed towards tablet
    TransformingToTablet,
    /// USB VBUS present
    UsbVbus,
    /// Lid fully folded (tablet or closed, depending on direction)
    FullyTransformed,
    /// Lid moving towards closed
    TransformingToClosed,
    /// Anything else, including id 4 whose meaning is unknown
    Other(u8),
}

impl SwitchId {
    pub const fn from_raw(id: u8) -> Self {
        match id {
            3 => Self::TransformingToTablet,
            5 => Self::UsbVbus,
            6 => Self::FullyTransformed,
            7 => Self::TransformingToClosed,
            other => Self::Other(other),
        }
    }

    pub const fn raw(self) -> u8 {
        match self {
            Self::TransformingToTablet => 3,
            Self::UsbVbus => 5,
            Self::FullyTransformed => 6,
            Self::TransformingToClosed => 7,
            Self::Other(id) => id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_bits() {
        let press = ScanCode(0x19);
        assert_eq!(press.kind(), ScanKind::Key { key: 0x19, pressed: true });

        let release = ScanCode(0x40 | 0x19);
        assert_eq!(release.kind(), ScanKind::Key { key: 0x19, pressed: false });
    }

    #[test]
    fn test_switch_bits() {
        // id 6, bit0 clear → on
        assert_eq!(
            ScanCode(0x80 | 6 << 1).kind(),
            ScanKind::Switch { id: SwitchId::FullyTransformed, on: true }
        );
        assert_eq!(
            ScanCode(0x80 | 5 << 1 | 1).kind(),
            ScanKind::Switch { id: SwitchId::UsbVbus, on: false }
        );
        assert_eq!(ScanCode(0x80 | 4 << 1).switch_id(), SwitchId::Other(4));
    }

    #[test]
    fn test_switch_id_raw_roundtrip() {
        for id in 0..32 {
            assert_eq!(SwitchId::from_raw(id).raw(), id);
        }
    }
}
