//! Configuration types
//!
//! Static panel geometry and the keyboard configuration surface. With the
//! `serde` feature these can be stored or shipped as postcard/TOML data.

pub mod keyboard;
pub mod panel;

pub use keyboard::*;
pub use panel::*;
