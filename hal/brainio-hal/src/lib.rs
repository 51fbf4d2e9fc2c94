//! brainio Hardware Abstraction Layer
//!
//! Bus and pin traits the brainio drivers are written against. A chip HAL
//! (see `brainio-hal-rp2040`) implements them on top of its peripherals, a
//! test harness implements them with recording mocks.
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │  brainio-drivers (ST7586, Brain keyboard) │
//! └──────────────────────────────────────────┘
//!                      │
//!                      ▼
//! ┌──────────────────────────────────────────┐
//! │  brainio-hal (this crate - traits)        │
//! └──────────────────────────────────────────┘
//!                      │
//!                      ▼
//! ┌──────────────────────────────────────────┐
//! │  brainio-hal-rp2040 / host mocks          │
//! └──────────────────────────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`], [`gpio::InputPin`] - D/C, reset and IRQ lines
//! - [`spi::SpiBus`] - write-only SPI used by the display
//! - [`i2c::I2cBus`] and [`i2c::SmbusExt`] - keyboard controller access

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod i2c;
pub mod spi;

// Re-export key traits at crate root for convenience
pub use gpio::{InputPin, OutputPin};
pub use i2c::{I2cBus, I2cConfig, SmbusExt};
pub use spi::{SpiBus, SpiConfig};
