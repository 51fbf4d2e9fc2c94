//! Keyboard controller drivers

pub mod brain_kbd;

pub use brain_kbd::{BrainKeyboard, KeyboardError};
