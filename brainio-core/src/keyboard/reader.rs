//! Scan sequence reader
//!
//! One interrupt delivers up to three scan bytes (N-key rollover):
//!
//! ```text
//! word 1:  [count:8][first:8]
//! word 2:  [second:8][third:8]     only read when count >= 2
//! ```
//!
//! [`ScanReader::handle_interrupt`] reads the sequence, feeds every byte
//! through the decoder and publishes the batch with a single sync.

use super::decoder::KeyDecoder;
use super::keymap::Keymap;
use super::scancode::ScanCode;
use crate::traits::{InputSink, ScanSource};

/// Most scan bytes accepted per interrupt
pub const MAX_CODES_PER_INTERRUPT: u8 = 3;

/// What happened during one interrupt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScanReport {
    /// Count as reported by the controller, before clamping
    pub reported: u8,
    /// Bytes consumed by the decoder
    pub decoded: u8,
    /// Bytes the decoder did not handle
    pub unhandled: u8,
    /// Events delivered to the sink
    pub events: u8,
    /// Controller reported more bytes than it can deliver
    pub clamped: bool,
}

impl ScanReport {
    /// Decode attempts made
    pub const fn attempts(&self) -> u8 {
        self.decoded + self.unhandled
    }
}

/// Result of [`ScanReader::handle_interrupt`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ScanOutcome<E> {
    /// Spurious interrupt, nothing pending
    NoKey,
    /// Sequence fully read and synced
    Complete(ScanReport),
    /// A read failed; `report` covers what was handled before it
    Aborted { report: ScanReport, error: E },
}

/// Interrupt-driven reader for one keyboard
#[derive(Debug, Clone)]
pub struct ScanReader {
    keymap: Keymap,
    decoder: KeyDecoder,
}

impl ScanReader {
    pub const fn new(keymap: Keymap) -> Self {
        Self {
            keymap,
            decoder: KeyDecoder::new(),
        }
    }

    pub fn keymap(&self) -> &Keymap {
        &self.keymap
    }

    pub fn decoder(&self) -> &KeyDecoder {
        &self.decoder
    }

    /// Forget modifier and held-key state (e.g. after a controller reset)
    pub fn reset(&mut self) {
        self.decoder.reset();
    }

    /// Read, decode and publish one interrupt's worth of scan bytes
    pub fn handle_interrupt<S, K>(&mut self, source: &mut S, sink: &mut K) -> ScanOutcome<S::Error>
    where
        S: ScanSource + ?Sized,
        K: InputSink + ?Sized,
    {
        let word = match source.read_word() {
            Ok(word) => word,
            Err(error) => {
                error!("Failed to read keycode");
                return ScanOutcome::Aborted {
                    report: ScanReport::default(),
                    error,
                };
            }
        };

        let [count, first] = word.to_be_bytes();
        debug!("N={}, k1={:#x}", count, first);

        if first == ScanCode::NONE {
            debug!("Interrupted but no key press was found");
            return ScanOutcome::NoKey;
        }

        let mut report = ScanReport {
            reported: count,
            ..ScanReport::default()
        };

        if count == 0 {
            sink.sync();
            return ScanOutcome::Complete(report);
        }

        let count = if count > MAX_CODES_PER_INTERRUPT {
            warn!("Invalid sequence length {}, clamping", count);
            report.clamped = true;
            MAX_CODES_PER_INTERRUPT
        } else {
            count
        };

        self.feed(first, sink, &mut report);

        if count >= 2 {
            match source.read_word() {
                Ok(word) => {
                    let [second, third] = word.to_be_bytes();
                    debug!("k2={:#x}, k3={:#x}", second, third);
                    self.feed(second, sink, &mut report);
                    if count >= 3 {
                        self.feed(third, sink, &mut report);
                    }
                }
                Err(error) => {
                    error!("Failed to read 2nd/3rd keycode");
                    sink.sync();
                    return ScanOutcome::Aborted { report, error };
                }
            }
        }

        sink.sync();
        ScanOutcome::Complete(report)
    }

    fn feed<K: InputSink + ?Sized>(&mut self, raw: u8, sink: &mut K, report: &mut ScanReport) {
        match self.decoder.decode(&self.keymap, raw) {
            Some(events) => {
                report.decoded += 1;
                for event in &events {
                    event.report_to(sink);
                    report.events += 1;
                }
            }
            None => {
                debug!("Unknown key was pressed: {:#x}", raw);
                report.unhandled += 1;
            }
        }
    }
}
