//! In-memory XRGB8888 images

use crate::traits::PixelSource;

/// Borrowed XRGB8888 framebuffer
///
/// `pitch` is the distance between rows in pixels and may exceed `width`
/// for padded scanouts.
#[derive(Debug, Clone, Copy)]
pub struct XrgbBuffer<'a> {
    data: &'a [u32],
    width: u16,
    height: u16,
    pitch: usize,
}

impl<'a> XrgbBuffer<'a> {
    /// Wrap a tightly packed buffer
    ///
    /// Returns `None` if `data` is shorter than `width * height`.
    pub fn new(data: &'a [u32], width: u16, height: u16) -> Option<Self> {
        Self::with_pitch(data, width, height, width as usize)
    }

    /// Wrap a buffer whose rows are `pitch` pixels apart
    pub fn with_pitch(data: &'a [u32], width: u16, height: u16, pitch: usize) -> Option<Self> {
        if pitch < width as usize {
            return None;
        }
        let needed = match height {
            0 => 0,
            h => pitch * (h as usize - 1) + width as usize,
        };
        if data.len() < needed {
            return None;
        }
        Some(Self {
            data,
            width,
            height,
            pitch,
        })
    }
}

impl PixelSource for XrgbBuffer<'_> {
    fn dimensions(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    #[inline]
    fn xrgb(&self, x: u16, y: u16) -> u32 {
        self.data[y as usize * self.pitch + x as usize]
    }
}
