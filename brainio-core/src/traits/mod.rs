//! Collaborator traits
//!
//! These traits define the interface between the cores and whatever owns
//! the buses, the framebuffer and the input subsystem.

pub mod display;
pub mod input;

pub use display::{DdramWriter, PixelSource};
pub use input::{InputSink, ScanSource};
