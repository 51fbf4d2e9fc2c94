//! Board wiring and generated configuration
//!
//! Reference wiring (Raspberry Pi Pico):
//!
//! | Signal        | GPIO | Peripheral |
//! |---------------|------|------------|
//! | LCD SCK       | 18   | SPI0       |
//! | LCD MOSI      | 19   | SPI0       |
//! | LCD CS        | 17   | held low   |
//! | LCD D/C       | 20   |            |
//! | LCD RESET     | 21   |            |
//! | KBD SDA       | 4    | I2C0       |
//! | KBD SCL       | 5    | I2C0       |
//! | KBD IRQ       | 6    | falling edge, pull-up |

use brainio_drivers::{BrainKeyboard, St7586};
use brainio_hal::{I2cConfig, SpiConfig};
use brainio_hal_rp2040::{RpI2c, RpInput, RpOutput, RpSpi};
use embassy_rp::gpio::{Input, Output};
use embassy_rp::i2c::{Blocking as I2cBlocking, I2c};
use embassy_rp::peripherals::{I2C0, SPI0};
use embassy_rp::spi::{Blocking as SpiBlocking, Spi};

/// Values generated from keymap.toml
pub mod generated {
    use brainio_core::config::KeymapTriple;

    include!(concat!(env!("OUT_DIR"), "/keymap.rs"));
}

pub type DisplaySpi = RpSpi<Spi<'static, SPI0, SpiBlocking>>;
pub type DisplayPin = RpOutput<Output<'static>>;
pub type Display = St7586<DisplaySpi, DisplayPin, DisplayPin>;

pub type KeyboardBus = RpI2c<I2c<'static, I2C0, I2cBlocking>>;
pub type Keyboard = BrainKeyboard<KeyboardBus>;
pub type KeyboardIrq = RpInput<Input<'static>>;

/// SPI settings for the ST7586 (mode 0)
pub fn display_spi_config() -> SpiConfig {
    SpiConfig {
        frequency: generated::SPI_FREQUENCY,
        ..SpiConfig::default()
    }
}

/// I2C settings for the keyboard controller
pub fn keyboard_i2c_config() -> I2cConfig {
    I2cConfig::STANDARD
}
