//! RP2040 HAL for the brainio firmware
//!
//! Implements the shared `brainio-hal` traits on top of embassy-rp:
//!
//! - Blocking SPI for the ST7586 ([`spi::RpSpi`])
//! - Blocking I2C for the keyboard controller ([`i2c::RpI2c`])
//! - GPIO wrappers for D/C, reset and IRQ lines ([`gpio::RpOutput`], [`gpio::RpInput`])
//!
//! The wrappers are generic over the embedded-hal 1.0 traits, which the
//! embassy-rp drivers implement.

#![no_std]

pub mod gpio;
pub mod i2c;
pub mod spi;

pub use gpio::{RpInput, RpOutput};
pub use i2c::{i2c_config, RpI2c};
pub use spi::{spi_config, RpSpi};
