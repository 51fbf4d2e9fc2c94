//! Board-agnostic core logic for the SHARP Brain sub-display and keyboard
//!
//! This crate holds everything that does not touch a bus directly:
//!
//! - Pixel packing into the ST7586 3-pixels-per-byte grayscale format
//! - DDRAM window arithmetic and the two-half display transmitter
//! - Keymap table built from configuration
//! - Key decoder state machine (symbol mode, switches, shadow releases)
//! - Scan sequence reader driving the decoder once per interrupt
//! - Collaborator traits for buses and input sinks

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

// Must come first so the logging macros are visible in every module.
#[macro_use]
mod fmt;

pub mod config;
pub mod keyboard;
pub mod pixel;
pub mod traits;
