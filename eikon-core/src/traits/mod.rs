//! Hardware abstraction traits
//!
//! These traits define the interface between the flush pipeline and
//! board-specific implementations.

pub mod render;
pub mod transport;

pub use render::{RenderStep, TickClock};
pub use transport::{DeviceTransport, TransportError};
