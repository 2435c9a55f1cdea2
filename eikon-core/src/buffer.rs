//! Frame buffer allocation
//!
//! Two capability-tagged pools feed the pipeline: a large (external)
//! pool for the renderer's retained partial draw buffer, and a fast
//! (DMA-capable) pool for the single-row transfer buffer. Both
//! buffers are allocated exactly once at startup and live for the
//! process lifetime; the flush controller only ever borrows them.
//!
//! Losing the draw buffer is fatal - the renderer's data model
//! requires it to exist and be stable. Losing the fast row buffer is
//! not: a statically reserved fallback row takes over, degraded but
//! correct, as long as it can hold one full device row.

use crate::config::DisplayGeometry;

/// Capacity of the statically reserved fallback row, in pixels
pub const FALLBACK_ROW_PIXELS: usize = 512;

/// Which pool a buffer came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PoolTag {
    /// Large external pool (PSRAM-class)
    LargeExternal,
    /// Fast internal, DMA-capable pool
    FastDma,
}

/// Where the active transfer row buffer lives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RowBufferSource {
    /// Allocated from the fast/DMA pool
    FastPool,
    /// The statically reserved fallback row (degraded mode)
    StaticFallback,
}

/// Allocation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AllocError {
    /// Large pool cannot supply the draw buffer. Fatal: the caller
    /// halts, a retained renderer cannot run without it.
    DrawBufferExhausted,
    /// Fast pool failed and the fallback row is narrower than the
    /// device. Partial rows cannot be represented, so this is a
    /// configuration error detected at startup.
    FallbackTooSmall { width: usize, capacity: usize },
    /// The fallback row was already handed out. The allocator is
    /// constructed once and `row_buffer` called once per process.
    FallbackUnavailable,
}

/// The renderer's retained partial draw buffer
#[derive(Debug)]
pub struct DrawBuffer<'a> {
    /// Backing pixels, exactly `stride * rows` long
    pub pixels: &'a mut [u16],
    /// Pixels per row
    pub stride: usize,
    /// Height in rows
    pub rows: usize,
    /// Pool the buffer came from
    pub pool: PoolTag,
}

impl DrawBuffer<'_> {
    /// Capacity in bytes
    pub fn capacity_bytes(&self) -> usize {
        self.pixels.len() * 2
    }
}

/// Single-row scratch buffer between conversion and the bus
#[derive(Debug)]
pub struct TransferRowBuffer<'a> {
    /// Backing pixels
    pub pixels: &'a mut [u16],
    /// Which pool is active
    pub source: RowBufferSource,
}

impl TransferRowBuffer<'_> {
    /// Capacity in pixels
    pub fn capacity(&self) -> usize {
        self.pixels.len()
    }
}

/// A capability-tagged pixel pool
///
/// Implemented by board-specific memory (two static arenas in the
/// firmware). An exhausted pool returns `None`; the allocator decides
/// whether that is fatal or degraded.
pub trait PixelPool<'a> {
    /// Allocate `pixels` 16-bit words, or `None` if exhausted
    fn alloc_pixels(&mut self, pixels: usize) -> Option<&'a mut [u16]>;
}

/// Bump allocator over a caller-owned pixel arena
///
/// Never frees; buffers handed out live as long as the arena. An
/// empty arena models a pool with nothing left to give.
pub struct ArenaPool<'a> {
    mem: &'a mut [u16],
}

impl<'a> ArenaPool<'a> {
    /// Create a pool over `mem`
    pub fn new(mem: &'a mut [u16]) -> Self {
        Self { mem }
    }

    /// Pixels still available
    pub fn remaining(&self) -> usize {
        self.mem.len()
    }
}

impl<'a> PixelPool<'a> for ArenaPool<'a> {
    fn alloc_pixels(&mut self, pixels: usize) -> Option<&'a mut [u16]> {
        let mem = core::mem::take(&mut self.mem);
        if pixels > mem.len() {
            self.mem = mem;
            return None;
        }
        let (out, rest) = mem.split_at_mut(pixels);
        self.mem = rest;
        Some(out)
    }
}

/// Owns both pipeline buffers for the process lifetime
///
/// Constructed once at startup from the two pools and the static
/// fallback row. There is no reinitialization path.
pub struct FrameBufferAllocator<'a, L, F> {
    large: L,
    fast: F,
    fallback: Option<&'a mut [u16]>,
}

impl<'a, L, F> FrameBufferAllocator<'a, L, F>
where
    L: PixelPool<'a>,
    F: PixelPool<'a>,
{
    /// Create the allocator
    ///
    /// `fallback` is the statically reserved row used when the fast
    /// pool cannot supply the transfer buffer.
    pub fn new(large: L, fast: F, fallback: &'a mut [u16]) -> Self {
        Self {
            large,
            fast,
            fallback: Some(fallback),
        }
    }

    /// Allocate the renderer's partial draw buffer
    ///
    /// Requests `width * height / fraction` pixels from the large
    /// pool, rounded down to whole rows of `width` pixels. Failure is
    /// fatal for the caller; no degraded mode exists for this buffer.
    pub fn draw_buffer(
        &mut self,
        geometry: &DisplayGeometry,
        fraction: u32,
    ) -> Result<DrawBuffer<'a>, AllocError> {
        let stride = geometry.width as usize;
        let total = (geometry.pixel_count() / fraction) as usize;
        let rows = total / stride;
        if rows == 0 {
            return Err(AllocError::DrawBufferExhausted);
        }

        let pixels = self
            .large
            .alloc_pixels(stride * rows)
            .ok_or(AllocError::DrawBufferExhausted)?;

        Ok(DrawBuffer {
            pixels,
            stride,
            rows,
            pool: PoolTag::LargeExternal,
        })
    }

    /// Allocate the transfer row buffer
    ///
    /// Tries the fast/DMA pool first; on failure substitutes the
    /// static fallback row (degraded mode, non-fatal). If the device
    /// row is wider than the fallback, partial rows would be needed,
    /// which the pipeline cannot represent - fail fast instead.
    pub fn row_buffer(
        &mut self,
        width_pixels: usize,
    ) -> Result<TransferRowBuffer<'a>, AllocError> {
        if let Some(pixels) = self.fast.alloc_pixels(width_pixels) {
            return Ok(TransferRowBuffer {
                pixels,
                source: RowBufferSource::FastPool,
            });
        }

        let fallback = self.fallback.take().ok_or(AllocError::FallbackUnavailable)?;
        if fallback.len() < width_pixels {
            return Err(AllocError::FallbackTooSmall {
                width: width_pixels,
                capacity: fallback.len(),
            });
        }

        Ok(TransferRowBuffer {
            pixels: fallback,
            source: RowBufferSource::StaticFallback,
        })
    }
}
