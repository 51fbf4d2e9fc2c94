//! Display transmitter
//!
//! Packs a damaged region and pushes it to the panel as two addressed
//! writes, one per DDRAM half. Failures abort the current flush only; the
//! panel keeps whatever reached it.

use super::gray::LumaWeights;
use super::packer::{pack, PackError};
use super::region::{PixelRegion, RegionError};
use super::window::DdramWindows;
use crate::config::PanelGeometry;
use crate::traits::{DdramWriter, PixelSource};

/// Flush errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FlushError<E> {
    /// Region could not be packed
    Pack(PackError),
    /// DDRAM write failed
    Transport(E),
}

impl<E> From<PackError> for FlushError<E> {
    fn from(e: PackError) -> Self {
        FlushError::Pack(e)
    }
}

/// Region-to-DDRAM transmitter for one panel
///
/// `scratch` must hold at least [`PanelGeometry::frame_len`] bytes for
/// full-panel flushes.
pub struct Transmitter<W, B> {
    writer: W,
    scratch: B,
    geometry: PanelGeometry,
    weights: LumaWeights,
    /// Set once the first failure has been logged
    failure_logged: bool,
}

impl<W, B> Transmitter<W, B>
where
    W: DdramWriter,
    B: AsMut<[u8]>,
{
    /// Create a transmitter using the kernel gray8 weights
    pub fn new(writer: W, scratch: B, geometry: PanelGeometry) -> Self {
        Self {
            writer,
            scratch,
            geometry,
            weights: LumaWeights::DRM_GRAY8,
            failure_logged: false,
        }
    }

    /// Replace the gray reduction
    pub fn with_weights(mut self, weights: LumaWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Panel geometry this transmitter addresses
    pub fn geometry(&self) -> &PanelGeometry {
        &self.geometry
    }

    /// Get access to the underlying writer
    pub fn writer(&self) -> &W {
        &self.writer
    }

    /// Get mutable access to the underlying writer
    pub fn writer_mut(&mut self) -> &mut W {
        &mut self.writer
    }

    /// Consume the transmitter and return writer and scratch buffer
    pub fn into_parts(self) -> (W, B) {
        (self.writer, self.scratch)
    }

    /// Flush the whole panel
    pub fn flush_all<S>(&mut self, source: &S) -> Result<(), FlushError<W::Error>>
    where
        S: PixelSource + ?Sized,
    {
        let region = self.geometry.full_region();
        self.flush(region, source)
    }

    /// Flush `region` of `source` to the panel
    ///
    /// The x-bounds are grown to whole packed words first. Rows past the
    /// panel height are rejected. The first failure is logged; later ones
    /// are only returned.
    pub fn flush<S>(&mut self, region: PixelRegion, source: &S) -> Result<(), FlushError<W::Error>>
    where
        S: PixelSource + ?Sized,
    {
        let result = self.try_flush(region, source);

        if result.is_err() && !self.failure_logged {
            self.failure_logged = true;
            match &result {
                Err(FlushError::Pack(e)) => error!("Failed to update display: {:?}", e),
                _ => error!("Failed to update display: DDRAM write failed"),
            }
        }
        result
    }

    fn try_flush<S>(&mut self, region: PixelRegion, source: &S) -> Result<(), FlushError<W::Error>>
    where
        S: PixelSource + ?Sized,
    {
        if region.x2 < region.x1 || region.y2 < region.y1 {
            return Err(PackError::InvalidRegion(RegionError::Inverted).into());
        }
        if region.y2 > self.geometry.height {
            return Err(PackError::InvalidRegion(RegionError::OutOfBounds).into());
        }
        let region = region.align_columns(self.geometry.width);
        if region.x1 > region.x2 {
            return Err(PackError::InvalidRegion(RegionError::OutOfBounds).into());
        }
        if region.is_empty() {
            return Ok(());
        }

        trace!(
            "Flushing ({}, {})-({}, {})",
            region.x1,
            region.y1,
            region.x2,
            region.y2
        );

        transmit(
            &mut self.writer,
            self.scratch.as_mut(),
            &self.weights,
            &region,
            self.geometry.page_offset,
            source,
        )
    }
}

fn transmit<W, S>(
    writer: &mut W,
    scratch: &mut [u8],
    weights: &LumaWeights,
    region: &PixelRegion,
    page_offset: u16,
    source: &S,
) -> Result<(), FlushError<W::Error>>
where
    W: DdramWriter,
    S: PixelSource + ?Sized,
{
    let frame = pack(region, source, weights, scratch)?;
    let windows = DdramWindows::for_region(region, page_offset);

    writer
        .write_window(windows.top, frame.top)
        .map_err(FlushError::Transport)?;
    writer
        .write_window(windows.bottom, frame.bottom)
        .map_err(FlushError::Transport)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pixel::{AddressWindow, XrgbBuffer};
    use heapless::Vec;

    /// Records every window write; optionally fails the nth call
    struct MockDdram {
        writes: Vec<(AddressWindow, Vec<u8, 64>), 4>,
        fail_on: Option<usize>,
        calls: usize,
    }

    impl MockDdram {
        fn new() -> Self {
            Self {
                writes: Vec::new(),
                fail_on: None,
                calls: 0,
            }
        }
    }

    impl DdramWriter for MockDdram {
        type Error = u8;

        fn write_window(&mut self, window: AddressWindow, data: &[u8]) -> Result<(), u8> {
            let call = self.calls;
            self.calls += 1;
            if self.fail_on == Some(call) {
                return Err(0xEE);
            }
            self.writes
                .push((window, Vec::from_slice(data).unwrap()))
                .unwrap();
            Ok(())
        }
    }

    const SMALL_PANEL: PanelGeometry = PanelGeometry {
        width: 12,
        height: 4,
        page_offset: 0x28,
    };

    #[test]
    fn test_flush_rounds_and_writes_two_halves() {
        let data = [0u32; 48]; // all black
        let img = XrgbBuffer::new(&data, 12, 4).unwrap();
        let mut tx = Transmitter::new(MockDdram::new(), [0u8; 16], SMALL_PANEL);

        tx.flush(PixelRegion::new(4, 0, 8, 4), &img).unwrap();

        let writes = &tx.writer().writes;
        assert_eq!(writes.len(), 2);
        // x 4..8 grows to 0..12 -> columns 0..4
        assert_eq!(writes[0].0.columns(), 0..4);
        assert_eq!(writes[0].0.pages(), 0x28..0x2A);
        assert_eq!(writes[1].0.pages(), 0x2A..0x2C);
        assert_eq!(writes[0].1.as_slice(), &[0xFF; 8]);
        assert_eq!(writes[1].1.as_slice(), &[0xFF; 8]);
    }

    #[test]
    fn test_flush_all_covers_panel() {
        let data = [0x00FF_FFFFu32; 48];
        let img = XrgbBuffer::new(&data, 12, 4).unwrap();
        let mut tx = Transmitter::new(MockDdram::new(), [0u8; 16], SMALL_PANEL);

        tx.flush_all(&img).unwrap();

        let writes = &tx.writer().writes;
        assert_eq!(writes[0].0.columns(), 0..4);
        assert_eq!(writes[0].1.len(), 8);
        assert_eq!(writes[1].1.as_slice(), &[0x00; 8]);
    }

    #[test]
    fn test_top_failure_aborts_flush() {
        let data = [0u32; 48];
        let img = XrgbBuffer::new(&data, 12, 4).unwrap();
        let mut ddram = MockDdram::new();
        ddram.fail_on = Some(0);
        let mut tx = Transmitter::new(ddram, [0u8; 16], SMALL_PANEL);

        assert_eq!(tx.flush_all(&img), Err(FlushError::Transport(0xEE)));
        assert_eq!(tx.writer().calls, 1);
        assert!(tx.writer().writes.is_empty());
    }

    #[test]
    fn test_bottom_failure_keeps_top() {
        let data = [0u32; 48];
        let img = XrgbBuffer::new(&data, 12, 4).unwrap();
        let mut ddram = MockDdram::new();
        ddram.fail_on = Some(1);
        let mut tx = Transmitter::new(ddram, [0u8; 16], SMALL_PANEL);

        assert_eq!(tx.flush_all(&img), Err(FlushError::Transport(0xEE)));
        assert_eq!(tx.writer().writes.len(), 1);
    }

    #[test]
    fn test_odd_height_is_rejected_without_writes() {
        let data = [0u32; 48];
        let img = XrgbBuffer::new(&data, 12, 4).unwrap();
        let mut tx = Transmitter::new(MockDdram::new(), [0u8; 16], SMALL_PANEL);

        let result = tx.flush(PixelRegion::new(0, 0, 12, 3), &img);
        assert_eq!(
            result,
            Err(FlushError::Pack(PackError::InvalidRegion(
                crate::pixel::RegionError::OddHeight
            )))
        );
        assert_eq!(tx.writer().calls, 0);
    }

    #[test]
    fn test_small_scratch_is_out_of_memory() {
        let data = [0u32; 48];
        let img = XrgbBuffer::new(&data, 12, 4).unwrap();
        let mut tx = Transmitter::new(MockDdram::new(), [0u8; 8], SMALL_PANEL);

        assert_eq!(
            tx.flush_all(&img),
            Err(FlushError::Pack(PackError::OutOfMemory {
                needed: 16,
                available: 8
            }))
        );
    }

    #[test]
    fn test_empty_region_is_noop() {
        let data = [0u32; 48];
        let img = XrgbBuffer::new(&data, 12, 4).unwrap();
        let mut tx = Transmitter::new(MockDdram::new(), [0u8; 16], SMALL_PANEL);

        assert_eq!(tx.flush(PixelRegion::new(3, 2, 6, 2), &img), Ok(()));
        assert_eq!(tx.writer().calls, 0);
    }

    #[test]
    fn test_inverted_region_is_rejected() {
        let data = [0u32; 48];
        let img = XrgbBuffer::new(&data, 12, 4).unwrap();
        let mut tx = Transmitter::new(MockDdram::new(), [0u8; 16], SMALL_PANEL);

        assert_eq!(
            tx.flush(PixelRegion::new(6, 0, 3, 2), &img),
            Err(FlushError::Pack(PackError::InvalidRegion(RegionError::Inverted)))
        );
        assert_eq!(tx.writer().calls, 0);
    }

    #[test]
    fn test_source_taller_than_panel_is_rejected() {
        let data = [0u32; 96];
        let img = XrgbBuffer::new(&data, 12, 8).unwrap();
        let mut tx = Transmitter::new(MockDdram::new(), [0u8; 32], SMALL_PANEL);

        assert_eq!(
            tx.flush(PixelRegion::new(0, 0, 12, 8), &img),
            Err(FlushError::Pack(PackError::InvalidRegion(RegionError::OutOfBounds)))
        );
        assert_eq!(tx.writer().calls, 0);

        // Rows inside the panel still flush from the larger source
        assert_eq!(tx.flush(PixelRegion::new(0, 2, 12, 4), &img), Ok(()));
        assert_eq!(tx.writer().writes[1].0.pages(), 0x2B..0x2C);
    }

    /// DDRAM model: one byte per (page, column), pages from `page_offset`
    struct MockPanel {
        ddram: [[u8; 4]; 2],
    }

    impl DdramWriter for MockPanel {
        type Error = u8;

        fn write_window(&mut self, window: AddressWindow, data: &[u8]) -> Result<(), u8> {
            let mut bytes = data.iter();
            for page in window.pages() {
                for col in window.columns() {
                    let row = &mut self.ddram[(page - WIDE_PANEL.page_offset) as usize];
                    row[col as usize] = *bytes.next().ok_or(0xEEu8)?;
                }
            }
            Ok(())
        }
    }

    const WIDE_PANEL: PanelGeometry = PanelGeometry {
        width: 12,
        height: 2,
        page_offset: 0x28,
    };

    #[test]
    fn test_partial_flushes_match_full_flush() {
        const BLACK: u32 = 0x0000_0000;
        const WHITE: u32 = 0x00FF_FFFF;
        const DARK: u32 = 0x0050_5050;
        const LIGHT: u32 = 0x00A0_A0A0;
        let data = [
            BLACK, BLACK, DARK, BLACK, LIGHT, BLACK, BLACK, DARK, BLACK, BLACK, BLACK, LIGHT,
            WHITE, LIGHT, WHITE, WHITE, WHITE, DARK, WHITE, WHITE, LIGHT, WHITE, BLACK, WHITE,
        ];
        let img = XrgbBuffer::new(&data, 12, 2).unwrap();

        let mut full = Transmitter::new(MockPanel { ddram: [[0x5A; 4]; 2] }, [0u8; 8], WIDE_PANEL);
        full.flush_all(&img).unwrap();

        let mut parts = Transmitter::new(MockPanel { ddram: [[0x5A; 4]; 2] }, [0u8; 8], WIDE_PANEL);
        for (x1, x2) in [(0, 3), (3, 6), (6, 12)] {
            parts.flush(PixelRegion::new(x1, 0, x2, 2), &img).unwrap();
        }

        assert_eq!(parts.writer().ddram, full.writer().ddram);
        // Rows differ, so a page swap cannot go unnoticed
        assert_ne!(full.writer().ddram[0], full.writer().ddram[1]);
    }
}
