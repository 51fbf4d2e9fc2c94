//! SPI adapter

use brainio_hal::spi::{Phase, Polarity};
use brainio_hal::{SpiBus, SpiConfig};
use embassy_rp::spi;

/// Blocking SPI bus implementing [`brainio_hal::SpiBus`]
pub struct RpSpi<T> {
    inner: T,
}

impl<T> RpSpi<T> {
    pub fn new(inner: T) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> T {
        self.inner
    }
}

impl<T: embedded_hal::spi::SpiBus> SpiBus for RpSpi<T> {
    type Error = T::Error;

    fn write(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        self.inner.write(data)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        self.inner.flush()
    }
}

/// Convert a bus config into the embassy-rp SPI config
pub fn spi_config(config: &SpiConfig) -> spi::Config {
    let (polarity, phase) = config.mode.into();
    let mut rp = spi::Config::default();
    rp.frequency = config.frequency;
    rp.polarity = match polarity {
        Polarity::IdleLow => spi::Polarity::IdleLow,
        Polarity::IdleHigh => spi::Polarity::IdleHigh,
    };
    rp.phase = match phase {
        Phase::CaptureOnFirstTransition => spi::Phase::CaptureOnFirstTransition,
        Phase::CaptureOnSecondTransition => spi::Phase::CaptureOnSecondTransition,
    };
    rp
}
