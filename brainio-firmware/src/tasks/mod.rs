//! Embassy async tasks
//!
//! Each task runs independently and communicates via channels/signals.

pub mod display;
pub mod input;
pub mod keyboard;

pub use display::display_task;
pub use input::input_task;
pub use keyboard::keyboard_task;
