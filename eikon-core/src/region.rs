//! Dirty region rectangle
//!
//! The renderer hands the flush controller one of these per paint.
//! Coordinates are inclusive device pixel coordinates, so a single
//! pixel region has x1 == x2 and y1 == y2.

use crate::config::DisplayGeometry;

/// A rectangular screen region requiring redraw
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DirtyRegion {
    /// Left edge (inclusive)
    pub x1: u16,
    /// Top edge (inclusive)
    pub y1: u16,
    /// Right edge (inclusive)
    pub x2: u16,
    /// Bottom edge (inclusive)
    pub y2: u16,
}

impl DirtyRegion {
    /// Create a region from inclusive corner coordinates
    pub const fn new(x1: u16, y1: u16, x2: u16, y2: u16) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Region width in pixels
    pub const fn width(&self) -> u16 {
        self.x2 - self.x1 + 1
    }

    /// Region height in pixels
    pub const fn height(&self) -> u16 {
        self.y2 - self.y1 + 1
    }

    /// Total pixels covered by the region
    pub const fn pixel_count(&self) -> u32 {
        self.width() as u32 * self.height() as u32
    }

    /// Check that the region is well-formed and inside the panel
    pub fn fits_in(&self, geometry: &DisplayGeometry) -> bool {
        self.x1 <= self.x2
            && self.y1 <= self.y2
            && self.x2 < geometry.width
            && self.y2 < geometry.height
    }
}
