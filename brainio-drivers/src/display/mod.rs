//! Display drivers

pub mod st7586;

pub use st7586::{Rotation, St7586, St7586Error};
