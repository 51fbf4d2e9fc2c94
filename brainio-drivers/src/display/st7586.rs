//! Sitronix ST7586 driver (SHARP Brain sub-LCD)
//!
//! The controller speaks MIPI-DBI type C over SPI with a separate D/C line:
//! a command byte goes out with D/C low, its parameters (or pixel data)
//! with D/C high.
//!
//! # Bring-up
//!
//! 1. Hardware reset pulse, 120ms settle
//! 2. OTP load (auto-read control, OTP read, OTP out)
//! 3. Sleep out, display off
//! 4. Analog setup (VOP, bias, booster), 4-level gray mode, DDRAM enable
//! 5. Address mode from rotation, duty and partial area for the Brain panel
//!
//! Display on is left to the caller so the first frame can be flushed
//! before the panel becomes visible.

use brainio_core::pixel::AddressWindow;
use brainio_core::traits::DdramWriter;
use brainio_hal::{OutputPin, SpiBus};
use embedded_hal::delay::DelayNs;

/// Command opcodes
pub mod cmd {
    // MIPI DCS
    pub const EXIT_SLEEP_MODE: u8 = 0x11;
    pub const EXIT_INVERT_MODE: u8 = 0x20;
    pub const SET_DISPLAY_OFF: u8 = 0x28;
    pub const SET_DISPLAY_ON: u8 = 0x29;
    pub const SET_COLUMN_ADDRESS: u8 = 0x2A;
    pub const SET_PAGE_ADDRESS: u8 = 0x2B;
    pub const WRITE_MEMORY_START: u8 = 0x2C;
    pub const SET_PARTIAL_AREA: u8 = 0x30;
    pub const SET_ADDRESS_MODE: u8 = 0x36;

    // ST7586 extensions
    pub const DISP_MODE_GRAY: u8 = 0x38;
    pub const DISP_MODE_MONO: u8 = 0x39;
    pub const ENABLE_DDRAM: u8 = 0x3A;
    pub const SET_DISP_DUTY: u8 = 0xB0;
    pub const SET_OUTPUT_COM: u8 = 0xB1;
    pub const SET_PART_DISP: u8 = 0xB4;
    pub const SET_NLINE_INV: u8 = 0xB5;
    pub const SET_VOP: u8 = 0xC0;
    pub const SET_BIAS_SYSTEM: u8 = 0xC3;
    pub const SET_BOOST_LEVEL: u8 = 0xC4;
    pub const SET_VOP_OFFSET: u8 = 0xC7;
    pub const ENABLE_ANALOG: u8 = 0xD0;
    pub const AUTO_READ_CTRL: u8 = 0xD7;
    pub const OTP_RW_CTRL: u8 = 0xE0;
    pub const OTP_CTRL_OUT: u8 = 0xE1;
    pub const OTP_READ: u8 = 0xE3;
}

/// Address mode bits
const DISP_CTRL_MX: u8 = 1 << 6;
const DISP_CTRL_MY: u8 = 1 << 7;

/// Panel mounting rotation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Rotation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    /// Parse a rotation in degrees; anything unsupported maps to 0
    pub const fn from_degrees(degrees: u16) -> Self {
        match degrees {
            90 => Self::Deg90,
            180 => Self::Deg180,
            270 => Self::Deg270,
            _ => Self::Deg0,
        }
    }

    /// `SET_ADDRESS_MODE` parameter
    pub const fn address_mode(self) -> u8 {
        match self {
            Self::Deg0 => 0x00,
            Self::Deg90 => DISP_CTRL_MY,
            Self::Deg180 => DISP_CTRL_MX | DISP_CTRL_MY,
            Self::Deg270 => DISP_CTRL_MX,
        }
    }
}

/// ST7586 errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum St7586Error<E> {
    /// SPI transfer failed
    Spi(E),
}

/// ST7586 on an SPI bus with D/C and reset lines
pub struct St7586<SPI, DC, RST> {
    spi: SPI,
    dc: DC,
    rst: RST,
    page_offset: u16,
    enabled: bool,
}

impl<SPI, DC, RST> St7586<SPI, DC, RST>
where
    SPI: SpiBus,
    DC: OutputPin,
    RST: OutputPin,
{
    /// DDRAM page of the first visible row on the Brain sub-LCD
    pub const BRAIN_PAGE_OFFSET: u16 = 0x28;

    pub fn new(spi: SPI, dc: DC, rst: RST) -> Self {
        Self {
            spi,
            dc,
            rst,
            page_offset: Self::BRAIN_PAGE_OFFSET,
            enabled: false,
        }
    }

    /// Use a different COM output offset
    pub fn with_page_offset(mut self, page_offset: u16) -> Self {
        self.page_offset = page_offset;
        self
    }

    /// Panel has been initialized and not disabled since
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Send one command with optional parameters
    pub fn command(&mut self, cmd: u8, params: &[u8]) -> Result<(), St7586Error<SPI::Error>> {
        self.dc.set_low();
        self.spi.write(&[cmd]).map_err(St7586Error::Spi)?;
        self.spi.flush().map_err(St7586Error::Spi)?;
        self.dc.set_high();
        if !params.is_empty() {
            self.spi.write(params).map_err(St7586Error::Spi)?;
            self.spi.flush().map_err(St7586Error::Spi)?;
        }
        Ok(())
    }

    /// Pulse the reset line
    pub fn hard_reset<D: DelayNs>(&mut self, delay: &mut D) {
        self.rst.set_low();
        delay.delay_us(20);
        self.rst.set_high();
        delay.delay_ms(120);
    }

    /// Reset and configure the panel, leaving the display off
    pub fn init<D: DelayNs>(
        &mut self,
        delay: &mut D,
        rotation: Rotation,
    ) -> Result<(), St7586Error<SPI::Error>> {
        debug!("ST7586 init, rotation {}", rotation);
        self.hard_reset(delay);

        self.command(cmd::AUTO_READ_CTRL, &[0x9F])?;
        self.command(cmd::OTP_RW_CTRL, &[0x00])?;
        delay.delay_ms(10);
        self.command(cmd::OTP_READ, &[])?;
        delay.delay_ms(20);
        self.command(cmd::OTP_CTRL_OUT, &[])?;
        self.command(cmd::EXIT_SLEEP_MODE, &[])?;
        self.command(cmd::SET_DISPLAY_OFF, &[])?;
        delay.delay_ms(50);

        self.command(cmd::SET_VOP_OFFSET, &[0x00])?;
        self.command(cmd::SET_VOP, &[0x19, 0x01])?;
        self.command(cmd::SET_BIAS_SYSTEM, &[0x03])?;
        self.command(cmd::SET_BOOST_LEVEL, &[0x07])?;
        self.command(cmd::ENABLE_ANALOG, &[0x1D])?;
        self.command(cmd::SET_NLINE_INV, &[0x00])?;
        self.command(cmd::DISP_MODE_GRAY, &[])?;
        self.command(cmd::ENABLE_DDRAM, &[0x02])?;

        self.command(cmd::SET_ADDRESS_MODE, &[rotation.address_mode()])?;

        // COM output offset is a single byte
        let com = self.page_offset.min(u16::from(u8::MAX)) as u8;
        self.command(cmd::SET_DISP_DUTY, &[0x77])?;
        self.command(cmd::SET_OUTPUT_COM, &[com])?;
        self.command(cmd::SET_PART_DISP, &[0xA0])?;
        self.command(cmd::SET_PARTIAL_AREA, &[0x00, 0x00, 0x00, 0x9F])?;
        self.command(cmd::EXIT_INVERT_MODE, &[])?;
        delay.delay_ms(100);

        self.enabled = true;
        info!("ST7586 ready");
        Ok(())
    }

    /// Turn the panel on (after the first flush)
    pub fn set_display_on(&mut self) -> Result<(), St7586Error<SPI::Error>> {
        self.command(cmd::SET_DISPLAY_ON, &[])
    }

    /// Turn the panel off; no-op unless enabled
    pub fn disable(&mut self) -> Result<(), St7586Error<SPI::Error>> {
        if !self.enabled {
            return Ok(());
        }
        self.command(cmd::SET_DISPLAY_OFF, &[])?;
        self.enabled = false;
        Ok(())
    }

    /// Release the bus and pins
    pub fn release(self) -> (SPI, DC, RST) {
        (self.spi, self.dc, self.rst)
    }
}

/// `[start_hi, start_lo, last_hi, last_lo]` for a half-open range
fn range_params(start: u16, end: u16) -> [u8; 4] {
    let [s_hi, s_lo] = start.to_be_bytes();
    let [e_hi, e_lo] = end.saturating_sub(1).to_be_bytes();
    [s_hi, s_lo, e_hi, e_lo]
}

impl<SPI, DC, RST> DdramWriter for St7586<SPI, DC, RST>
where
    SPI: SpiBus,
    DC: OutputPin,
    RST: OutputPin,
{
    type Error = St7586Error<SPI::Error>;

    fn write_window(&mut self, window: AddressWindow, data: &[u8]) -> Result<(), Self::Error> {
        self.command(
            cmd::SET_COLUMN_ADDRESS,
            &range_params(window.col_start, window.col_end),
        )?;
        self.command(
            cmd::SET_PAGE_ADDRESS,
            &range_params(window.page_start, window.page_end),
        )?;
        self.command(cmd::WRITE_MEMORY_START, data)
    }
}
