//! Region flush controller
//!
//! Orchestrates one dirty rectangle: validate, program the device
//! window once, then stream the region row by row through the
//! transfer buffer in raster order, and acknowledge the renderer.
//!
//! Per invocation the phases run Idle -> WindowSet -> RowLoop ->
//! Complete -> Idle; the controller holds no state across
//! invocations beyond the capabilities it was constructed with.
//!
//! The acknowledgment is the liveness contract of the whole bridge:
//! the renderer blocks further painting until it arrives, so it is
//! delivered exactly once on every exit path - success, rejected
//! region, or bus fault mid-region. A missed ack is a terminal
//! stall, not a recoverable error, so the signal is tied to scope
//! exit rather than to any particular return.

use crate::buffer::TransferRowBuffer;
use crate::config::DisplayGeometry;
use crate::pixel::convert_row;
use crate::region::DirtyRegion;
use crate::traits::{DeviceTransport, TransportError};

/// Errors from a single flush cycle
///
/// None of these stall the renderer; the ack has already been
/// delivered when the error is returned. Transport faults leave the
/// region's visual content undefined for the cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FlushError {
    /// Region lies outside the panel or has inverted corners
    RegionOutOfBounds,
    /// Region is wider than the transfer row buffer
    RowBufferTooSmall,
    /// Pixel view is shorter than width * height
    SourceTooShort,
    /// Bus fault during window set or pixel push
    Transport(TransportError),
}

impl From<TransportError> for FlushError {
    fn from(e: TransportError) -> Self {
        FlushError::Transport(e)
    }
}

/// Fires the flush acknowledgment on scope exit
struct Ack<F: FnOnce()> {
    signal: Option<F>,
}

impl<F: FnOnce()> Ack<F> {
    fn new(signal: F) -> Self {
        Self {
            signal: Some(signal),
        }
    }
}

impl<F: FnOnce()> Drop for Ack<F> {
    fn drop(&mut self) {
        if let Some(signal) = self.signal.take() {
            signal();
        }
    }
}

/// Flushes dirty regions to the device
///
/// Constructed once with the transport capability and the fixed
/// panel geometry; both are passed explicitly, never recovered from
/// an opaque handle.
pub struct FlushController<T> {
    transport: T,
    geometry: DisplayGeometry,
}

impl<T: DeviceTransport> FlushController<T> {
    /// Create a controller for the given transport and geometry
    pub fn new(transport: T, geometry: DisplayGeometry) -> Self {
        Self {
            transport,
            geometry,
        }
    }

    /// Panel geometry this controller flushes against
    pub fn geometry(&self) -> &DisplayGeometry {
        &self.geometry
    }

    /// Flush one dirty region
    ///
    /// `src` is the packed pixel view of the region: `width * height`
    /// native-byte-order pixels with a row stride equal to the region
    /// width. `on_ack` is invoked exactly once before this returns,
    /// on every path.
    pub fn flush_region<F: FnOnce()>(
        &mut self,
        region: DirtyRegion,
        src: &[u16],
        row: &mut TransferRowBuffer<'_>,
        on_ack: F,
    ) -> Result<(), FlushError> {
        let _ack = Ack::new(on_ack);
        self.flush_inner(region, src, row)
    }

    fn flush_inner(
        &mut self,
        region: DirtyRegion,
        src: &[u16],
        row: &mut TransferRowBuffer<'_>,
    ) -> Result<(), FlushError> {
        if !region.fits_in(&self.geometry) {
            return Err(FlushError::RegionOutOfBounds);
        }

        let w = region.width() as usize;
        let h = region.height() as usize;
        if w > row.capacity() {
            return Err(FlushError::RowBufferTooSmall);
        }
        if src.len() < w * h {
            return Err(FlushError::SourceTooShort);
        }

        // WindowSet: exactly once per region
        self.transport
            .set_window(region.x1, region.y1, region.width(), region.height())?;

        // RowLoop: strictly increasing y, pixels strictly increasing
        // x within each row. The device window auto-increments in
        // raster order; any reordering corrupts the image.
        for src_row in src[..w * h].chunks_exact(w) {
            convert_row(src_row, row.pixels);
            self.transport.push_row(&row.pixels[..w], true)?;
        }

        Ok(())
    }
}
