//! Display-side collaborators

use crate::pixel::AddressWindow;

/// Addressed writes into panel DDRAM
///
/// One call selects the column/page window and streams `data` into it.
pub trait DdramWriter {
    /// Transport error
    type Error;

    /// Write `data` into the DDRAM area described by `window`
    fn write_window(&mut self, window: AddressWindow, data: &[u8]) -> Result<(), Self::Error>;
}

impl<T: DdramWriter + ?Sized> DdramWriter for &mut T {
    type Error = T::Error;

    fn write_window(&mut self, window: AddressWindow, data: &[u8]) -> Result<(), Self::Error> {
        T::write_window(self, window, data)
    }
}

/// Readable XRGB8888 image
pub trait PixelSource {
    /// Image size as (width, height) in pixels
    fn dimensions(&self) -> (u16, u16);

    /// Pixel at (x, y) as 0xXXRRGGBB
    ///
    /// Only called with coordinates inside [`dimensions`](Self::dimensions).
    fn xrgb(&self, x: u16, y: u16) -> u32;
}

impl<T: PixelSource + ?Sized> PixelSource for &T {
    fn dimensions(&self) -> (u16, u16) {
        T::dimensions(self)
    }

    fn xrgb(&self, x: u16, y: u16) -> u32 {
        T::xrgb(self, x, y)
    }
}
