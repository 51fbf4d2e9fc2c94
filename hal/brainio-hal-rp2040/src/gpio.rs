//! GPIO adapters
//!
//! embassy-rp pins are infallible, so the error type is fixed to
//! `Infallible` and results are discarded.

use core::convert::Infallible;

use brainio_hal::{InputPin, OutputPin};
use embedded_hal::digital;

/// Push-pull output (D/C, reset)
pub struct RpOutput<T> {
    inner: T,
}

impl<T> RpOutput<T> {
    pub fn new(inner: T) -> Self {
        Self { inner }
    }
}

impl<T: digital::OutputPin<Error = Infallible>> OutputPin for RpOutput<T> {
    fn set_high(&mut self) {
        let _ = self.inner.set_high();
    }

    fn set_low(&mut self) {
        let _ = self.inner.set_low();
    }
}

/// Input line (keyboard IRQ)
pub struct RpInput<T> {
    inner: T,
}

impl<T> RpInput<T> {
    pub fn new(inner: T) -> Self {
        Self { inner }
    }

    /// Underlying pin, for edge waits
    pub fn inner_mut(&mut self) -> &mut T {
        &mut self.inner
    }
}

impl<T: digital::InputPin<Error = Infallible>> InputPin for RpInput<T> {
    fn is_high(&mut self) -> bool {
        matches!(self.inner.is_high(), Ok(true))
    }
}
