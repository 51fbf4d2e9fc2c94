//! Hardware drivers
//!
//! Concrete implementations of the collaborator traits defined in
//! brainio-core, written against the brainio-hal bus traits:
//!
//! - ST7586 sub-LCD over SPI + D/C line (a `DdramWriter`)
//! - Brain keyboard controller over I2C (a `ScanSource`)
//!
//! `fmt.rs` is a verbatim copy of the brainio-core logging shim.

#![no_std]
#![deny(unsafe_code)]

#[macro_use]
mod fmt;

pub mod display;
pub mod keyboard;

pub use display::{Rotation, St7586, St7586Error};
pub use keyboard::{BrainKeyboard, KeyboardError};
