//! Keyboard-side collaborators

use crate::keyboard::{KeyCode, Switch};

/// Source of raw scan words from the keyboard controller
///
/// The first read after an interrupt yields `count << 8 | first_code`,
/// an optional second read yields `second_code << 8 | third_code`.
pub trait ScanSource {
    /// Transport error
    type Error;

    /// Read one 16-bit scan word
    fn read_word(&mut self) -> Result<u16, Self::Error>;
}

impl<T: ScanSource + ?Sized> ScanSource for &mut T {
    type Error = T::Error;

    fn read_word(&mut self) -> Result<u16, Self::Error> {
        T::read_word(self)
    }
}

/// Receiver for decoded input events
///
/// Events are batched; [`sync`](Self::sync) marks the end of one interrupt's
/// worth of events.
pub trait InputSink {
    /// Report a key transition
    fn report_key(&mut self, code: KeyCode, pressed: bool);

    /// Report a switch state
    fn report_switch(&mut self, switch: Switch, on: bool);

    /// Publish everything reported since the last sync
    fn sync(&mut self);
}

impl<T: InputSink + ?Sized> InputSink for &mut T {
    fn report_key(&mut self, code: KeyCode, pressed: bool) {
        T::report_key(self, code, pressed)
    }

    fn report_switch(&mut self, switch: Switch, on: bool) {
        T::report_switch(self, switch, on)
    }

    fn sync(&mut self) {
        T::sync(self)
    }
}
