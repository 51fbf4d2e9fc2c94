//! Inter-task communication channels
//!
//! Defines the static channels used for communication between Embassy tasks.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::signal::Signal;

use brainio_core::keyboard::InputEvent;

/// Channel capacity for decoded input events
const INPUT_CHANNEL_SIZE: usize = 16;

/// Decoded keyboard events, published once per interrupt
pub static INPUT_EVENTS: Channel<CriticalSectionRawMutex, InputEvent, INPUT_CHANNEL_SIZE> =
    Channel::new();

/// Redraw request for the display task; value is the pattern inversion
pub static REDRAW: Signal<CriticalSectionRawMutex, bool> = Signal::new();
