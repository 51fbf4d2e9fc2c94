//! Keyboard task
//!
//! Waits for the controller's IRQ line and runs one scan sequence per
//! interrupt. The controller keeps the line low while codes are pending,
//! so the task keeps reading until it goes high again.

use defmt::*;
use embassy_time::{Duration, Timer};
use heapless::Vec;

use brainio_core::keyboard::{InputEvent, KeyCode, ScanOutcome, ScanReader, Switch};
use brainio_core::traits::InputSink;
use brainio_hal::InputPin;

use crate::board::{Keyboard, KeyboardIrq};
use crate::channels::INPUT_EVENTS;

/// Most sequences handled per IRQ edge before waiting again
const MAX_DRAIN: usize = 8;

/// Back-off after a bus error
const ERROR_BACKOFF_MS: u64 = 10;

/// Sink that batches events and publishes them on sync
struct ChannelSink {
    pending: Vec<InputEvent, 8>,
}

impl ChannelSink {
    const fn new() -> Self {
        Self {
            pending: Vec::new(),
        }
    }

    fn stage(&mut self, event: InputEvent) {
        if self.pending.push(event).is_err() {
            warn!("Input batch full, dropping {:?}", event);
        }
    }
}

impl InputSink for ChannelSink {
    fn report_key(&mut self, code: KeyCode, pressed: bool) {
        self.stage(InputEvent::key(code, pressed));
    }

    fn report_switch(&mut self, switch: Switch, on: bool) {
        self.stage(InputEvent::switch(switch, on));
    }

    fn sync(&mut self) {
        for event in &self.pending {
            if INPUT_EVENTS.try_send(*event).is_err() {
                warn!("Input channel full, dropping {:?}", event);
            }
        }
        self.pending.clear();
    }
}

/// Keyboard task - owns the controller, IRQ line and decoder state
#[embassy_executor::task]
pub async fn keyboard_task(mut kbd: Keyboard, mut irq: KeyboardIrq, mut reader: ScanReader) {
    info!("Keyboard task started");

    let mut sink = ChannelSink::new();

    loop {
        if irq.is_high() {
            irq.inner_mut().wait_for_falling_edge().await;
        }

        for _ in 0..MAX_DRAIN {
            match reader.handle_interrupt(&mut kbd, &mut sink) {
                ScanOutcome::NoKey => break,
                ScanOutcome::Complete(report) => {
                    trace!(
                        "Scan: {} decoded, {} unhandled, {} events",
                        report.decoded,
                        report.unhandled,
                        report.events
                    );
                }
                ScanOutcome::Aborted { report, error } => {
                    warn!("Scan aborted after {} codes: {:?}", report.attempts(), error);
                    Timer::after(Duration::from_millis(ERROR_BACKOFF_MS)).await;
                    break;
                }
            }

            if irq.is_high() {
                break;
            }
        }
    }
}
