//! brainio - SHARP Brain sub-display and keyboard firmware
//!
//! Reference firmware for an RP2040 wired to the Brain 2nd generation
//! sub-LCD (ST7586) and keyboard controller. The keyboard and display run
//! as independent tasks and talk through embassy-sync channels.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::i2c::I2c;
use embassy_rp::spi::Spi;
use embassy_time::Delay;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use brainio_core::config::{KeyboardConfig, BRAIN_SUBLCD_FRAME_LEN};
use brainio_core::keyboard::{Keymap, ScanReader};
use brainio_drivers::{BrainKeyboard, St7586};
use brainio_hal_rp2040::{i2c_config, spi_config, RpI2c, RpInput, RpOutput, RpSpi};

use crate::board::generated;

mod board;
mod channels;
mod pattern;
mod tasks;

/// Packed frame buffer for the display (must live forever)
static FRAME: StaticCell<[u8; BRAIN_SUBLCD_FRAME_LEN]> = StaticCell::new();

/// LCD chip select, held asserted for the lifetime of the firmware
static LCD_CS: StaticCell<Output<'static>> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("brainio firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    // Display: SPI0 (SCK=GPIO18, MOSI=GPIO19), CS=GPIO17, D/C=GPIO20, RESET=GPIO21
    let spi = Spi::new_blocking_txonly(
        p.SPI0,
        p.PIN_18,
        p.PIN_19,
        spi_config(&board::display_spi_config()),
    );
    // Only device on the bus
    LCD_CS.init(Output::new(p.PIN_17, Level::Low));
    let dc = RpOutput::new(Output::new(p.PIN_20, Level::Low));
    let rst = RpOutput::new(Output::new(p.PIN_21, Level::High));
    let lcd = St7586::new(RpSpi::new(spi), dc, rst);

    let frame = FRAME.init([0u8; BRAIN_SUBLCD_FRAME_LEN]);
    spawner.spawn(tasks::display_task(lcd, frame)).unwrap();

    // Keyboard: I2C0 (SDA=GPIO4, SCL=GPIO5), IRQ=GPIO6
    let i2c = I2c::new_blocking(
        p.I2C0,
        p.PIN_5,
        p.PIN_4,
        i2c_config(&board::keyboard_i2c_config()),
    );
    let irq = RpInput::new(Input::new(p.PIN_6, Pull::Up));
    let mut kbd = BrainKeyboard::new(RpI2c::new(i2c), generated::KEYBOARD_ADDRESS);

    let config = KeyboardConfig::from_table(generated::SYMBOL_KEYCODE, generated::KEYMAP);
    match Keymap::from_config(&config) {
        Ok(keymap) => {
            info!(
                "Keymap loaded: {} codes, symbol key {:#x}",
                keymap.capabilities().len(),
                keymap.symbol_keycode()
            );
            match kbd.init(&mut Delay) {
                Ok(()) => {
                    spawner
                        .spawn(tasks::keyboard_task(kbd, irq, ScanReader::new(keymap)))
                        .unwrap();
                }
                Err(e) => error!("Keyboard controller not responding: {:?}", e),
            }
        }
        Err(e) => error!("Keyboard disabled, invalid keymap: {:?}", e),
    }

    spawner.spawn(tasks::input_task()).unwrap();

    info!("All tasks spawned");
}
