//! Bridge configuration types
//!
//! Geometry and timing are fixed at startup. Nothing here is mutated
//! after the allocator and scheduler have been constructed.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default draw buffer sizing: 1/10th of the full screen in pixels
pub const DEFAULT_DRAW_FRACTION: u32 = 10;

/// Default cooperative tick interval in milliseconds
pub const DEFAULT_TICK_INTERVAL_MS: u32 = 5;

/// Panel rotation, fixed at startup
///
/// Rotation is carried as configuration only and is never forwarded
/// to the panel at runtime. Hardware rotation misbehaves on the
/// target panel (unresolved), so logical width/height are treated as
/// ground truth for the chosen orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Rotation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

/// Logical display geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DisplayGeometry {
    /// Width in pixels
    pub width: u16,
    /// Height in pixels
    pub height: u16,
    /// Active rotation
    pub rotation: Rotation,
}

impl DisplayGeometry {
    /// Create a geometry with no rotation
    pub const fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            rotation: Rotation::Deg0,
        }
    }

    /// Total pixel count of the panel
    pub const fn pixel_count(&self) -> u32 {
        self.width as u32 * self.height as u32
    }
}

impl Default for DisplayGeometry {
    fn default() -> Self {
        // Guition 3.5" portrait panel
        Self::new(320, 480)
    }
}

/// Configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Width or height is zero
    ZeroDimension,
    /// Draw buffer fraction is zero
    ZeroFraction,
    /// Tick interval is zero or not sub-10ms
    BadTickInterval,
}

/// Top-level bridge configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BridgeConfig {
    /// Display geometry
    pub geometry: DisplayGeometry,
    /// Draw buffer holds width*height/fraction pixels
    pub draw_buffer_fraction: u32,
    /// Cooperative scheduler tick interval (ms)
    pub tick_interval_ms: u32,
}

impl BridgeConfig {
    /// Validate the configuration before any allocation sizing
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.geometry.width == 0 || self.geometry.height == 0 {
            return Err(ConfigError::ZeroDimension);
        }
        if self.draw_buffer_fraction == 0 {
            return Err(ConfigError::ZeroFraction);
        }
        // The render loop must stay responsive; the scheduler is
        // non-preemptive so the delay bounds flush latency.
        if self.tick_interval_ms == 0 || self.tick_interval_ms >= 10 {
            return Err(ConfigError::BadTickInterval);
        }
        Ok(())
    }
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            geometry: DisplayGeometry::default(),
            draw_buffer_fraction: DEFAULT_DRAW_FRACTION,
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
        }
    }
}
