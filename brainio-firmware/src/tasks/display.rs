//! Display task
//!
//! Brings up the ST7586, shows the test pattern, then redraws whenever
//! another task signals [`REDRAW`].

use defmt::*;
use embassy_time::Delay;

use brainio_core::config::{PanelGeometry, BRAIN_SUBLCD_FRAME_LEN};
use brainio_core::pixel::Transmitter;
use brainio_drivers::Rotation;

use crate::board::{generated, Display};
use crate::channels::REDRAW;
use crate::pattern::GrayRamp;

#[embassy_executor::task]
pub async fn display_task(mut lcd: Display, scratch: &'static mut [u8; BRAIN_SUBLCD_FRAME_LEN]) {
    info!("Display task started");

    let rotation = Rotation::from_degrees(generated::ROTATION_DEGREES);
    if let Err(e) = lcd.init(&mut Delay, rotation) {
        error!("Failed to initialize display: {:?}", e);
        return;
    }

    let geometry = PanelGeometry::BRAIN_SUBLCD;
    let mut tx = Transmitter::new(lcd, scratch, geometry);
    let mut pattern = GrayRamp {
        width: geometry.width,
        height: geometry.height,
        inverted: false,
    };

    if let Err(e) = tx.flush_all(&pattern) {
        warn!("Initial flush failed: {:?}", e);
    }
    if let Err(e) = tx.writer_mut().set_display_on() {
        error!("Failed to turn display on: {:?}", e);
    }

    loop {
        pattern.inverted = REDRAW.wait().await;
        debug!("Redraw, inverted={}", pattern.inverted);
        if let Err(e) = tx.flush_all(&pattern) {
            warn!("Flush failed: {:?}", e);
        }
    }
}
