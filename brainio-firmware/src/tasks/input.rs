//! Input consumer task
//!
//! Stands in for the host input layer: logs every event and flips the
//! test pattern when the lid reports tablet mode.

use defmt::*;

use brainio_core::keyboard::{InputEvent, Switch};

use crate::channels::{INPUT_EVENTS, REDRAW};

#[embassy_executor::task]
pub async fn input_task() {
    info!("Input task started");

    let mut inverted = false;

    loop {
        match INPUT_EVENTS.receive().await {
            InputEvent::Key { code, pressed } => {
                info!("Key {} {}", code.code(), if pressed { "down" } else { "up" });
            }
            InputEvent::Switch { switch, on } => {
                info!("Switch {:?} (code {}) = {}", switch, switch.code(), on);
                if switch == Switch::TabletMode && on != inverted {
                    inverted = on;
                    REDRAW.signal(inverted);
                }
            }
        }
    }
}
