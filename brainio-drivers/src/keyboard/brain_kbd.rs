//! SHARP Brain keyboard controller (I2C)
//!
//! The controller raises an IRQ line when scan codes are pending and hands
//! them out through SMBus "read word swapped" on command 0x04. Decoding is
//! left to `brainio_core::keyboard`; this driver only moves words.

use brainio_core::traits::ScanSource;
use brainio_hal::{I2cBus, SmbusExt};
use embedded_hal::delay::DelayNs;

/// Keycode FIFO register
pub const CMD_KEYCODE: u8 = 0x04;

/// Settle time after the wake-up sequence
pub const WAKE_SETTLE_MS: u32 = 500;

/// One step of the controller wake-up sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WakeStep {
    ReadByte(u8),
    ReadWord(u8),
    WriteByte(u8, u8),
}

/// Register accesses that bring the controller out of reset
pub const WAKE_SEQUENCE: &[WakeStep] = &[
    WakeStep::ReadByte(0x00),
    WakeStep::ReadByte(0x0A),
    WakeStep::ReadByte(0x01),
    WakeStep::ReadByte(0x40),
    WakeStep::ReadByte(0x41),
    WakeStep::ReadByte(0x48),
    WakeStep::ReadByte(0x00),
    WakeStep::ReadWord(CMD_KEYCODE),
    WakeStep::ReadByte(0x01),
    WakeStep::ReadByte(0x0A),
    WakeStep::ReadByte(0x00),
    WakeStep::ReadByte(0x0A),
    WakeStep::ReadByte(0x01),
    WakeStep::WriteByte(0x88, 0x08),
    WakeStep::WriteByte(0x82, 0x05),
    WakeStep::ReadByte(0x00),
    WakeStep::ReadByte(0x0A),
    WakeStep::WriteByte(0x82, 0x02),
    WakeStep::WriteByte(0x82, 0x03),
];

/// Keyboard driver errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum KeyboardError<E> {
    /// Bus transfer failed
    I2c(E),
}

/// Brain keyboard controller at a fixed I2C address
pub struct BrainKeyboard<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C: I2cBus> BrainKeyboard<I2C> {
    pub fn new(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    pub fn address(&self) -> u8 {
        self.address
    }

    /// Run the wake-up sequence and drain the first keycode word
    pub fn init<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), KeyboardError<I2C::Error>> {
        debug!("Waking keyboard controller at {:#x}", self.address);
        for step in WAKE_SEQUENCE {
            self.run(*step).map_err(KeyboardError::I2c)?;
        }
        delay.delay_ms(WAKE_SETTLE_MS);

        // First word after wake-up is stale
        self.i2c
            .read_word_data(self.address, CMD_KEYCODE)
            .map_err(KeyboardError::I2c)?;
        info!("Keyboard controller ready");
        Ok(())
    }

    fn run(&mut self, step: WakeStep) -> Result<(), I2C::Error> {
        match step {
            WakeStep::ReadByte(cmd) => self.i2c.read_byte_data(self.address, cmd).map(drop),
            WakeStep::ReadWord(cmd) => self.i2c.read_word_data(self.address, cmd).map(drop),
            WakeStep::WriteByte(cmd, value) => self.i2c.write_byte_data(self.address, cmd, value),
        }
    }

    /// Release the bus
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C: I2cBus> ScanSource for BrainKeyboard<I2C> {
    type Error = KeyboardError<I2C::Error>;

    fn read_word(&mut self) -> Result<u16, Self::Error> {
        self.i2c
            .read_word_swapped(self.address, CMD_KEYCODE)
            .map_err(KeyboardError::I2c)
    }
}
