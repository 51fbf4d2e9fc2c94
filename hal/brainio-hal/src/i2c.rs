//! I2C bus abstractions
//!
//! Provides the raw I2C master trait plus the SMBus-style register
//! helpers the keyboard controller speaks.

/// I2C bus master
pub trait I2cBus {
    /// Error type for I2C operations
    type Error;

    /// Write data to a device at the given address
    ///
    /// # Arguments
    /// * `address` - 7-bit I2C address
    /// * `data` - Bytes to write
    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error>;

    /// Read data from a device at the given address
    ///
    /// # Arguments
    /// * `address` - 7-bit I2C address
    /// * `buf` - Buffer to read into
    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), Self::Error>;

    /// Write then read in a single transaction (repeated start)
    ///
    /// # Arguments
    /// * `address` - 7-bit I2C address
    /// * `write_data` - Bytes to write (typically a command/register)
    /// * `read_buf` - Buffer to read into
    fn write_read(
        &mut self,
        address: u8,
        write_data: &[u8],
        read_buf: &mut [u8],
    ) -> Result<(), Self::Error>;
}

impl<T: I2cBus + ?Sized> I2cBus for &mut T {
    type Error = T::Error;

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error> {
        T::write(self, address, data)
    }

    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), Self::Error> {
        T::read(self, address, buf)
    }

    fn write_read(
        &mut self,
        address: u8,
        write_data: &[u8],
        read_buf: &mut [u8],
    ) -> Result<(), Self::Error> {
        T::write_read(self, address, write_data, read_buf)
    }
}

/// SMBus transactions layered on [`I2cBus`]
///
/// Word transfers follow SMBus byte order (low byte first). The
/// `_swapped` variant is for devices that send the high byte first.
pub trait SmbusExt: I2cBus {
    /// Read one byte from register `command`
    fn read_byte_data(&mut self, address: u8, command: u8) -> Result<u8, Self::Error> {
        let mut buf = [0u8; 1];
        self.write_read(address, &[command], &mut buf)?;
        Ok(buf[0])
    }

    /// Write one byte to register `command`
    fn write_byte_data(&mut self, address: u8, command: u8, value: u8) -> Result<(), Self::Error> {
        self.write(address, &[command, value])
    }

    /// Read a little-endian word from register `command`
    fn read_word_data(&mut self, address: u8, command: u8) -> Result<u16, Self::Error> {
        let mut buf = [0u8; 2];
        self.write_read(address, &[command], &mut buf)?;
        Ok(u16::from_le_bytes(buf))
    }

    /// Read a big-endian word from register `command`
    fn read_word_swapped(&mut self, address: u8, command: u8) -> Result<u16, Self::Error> {
        let mut buf = [0u8; 2];
        self.write_read(address, &[command], &mut buf)?;
        Ok(u16::from_be_bytes(buf))
    }
}

impl<T: I2cBus + ?Sized> SmbusExt for T {}

/// I2C configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct I2cConfig {
    /// Clock frequency in Hz
    pub frequency: u32,
}

impl Default for I2cConfig {
    fn default() -> Self {
        Self::STANDARD
    }
}

impl I2cConfig {
    /// Standard mode (100 kHz)
    pub const STANDARD: Self = Self { frequency: 100_000 };

    /// Fast mode (400 kHz)
    pub const FAST: Self = Self { frequency: 400_000 };
}
