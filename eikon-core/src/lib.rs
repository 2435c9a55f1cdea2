//! Board-agnostic core of the Eikon display bridge
//!
//! This crate contains everything in the region flush pipeline that
//! does not depend on a specific bus or board:
//!
//! - Display geometry and bridge configuration
//! - Dirty-region rectangle type
//! - RGB565 byte-order conversion
//! - Two-pool frame buffer allocator with static fallback
//! - Region flush controller (window set + raster row loop + ack)
//! - Cooperative render scheduler
//! - Hardware abstraction traits (transport, tick clock, render step)
//!
//! The flow is: renderer produces a dirty rectangle plus a packed
//! pixel view, the flush controller converts each row into the
//! transfer buffer and streams it through a [`traits::DeviceTransport`],
//! then acknowledges the renderer. One flush completes fully before
//! the next begins; there is no concurrency inside this crate.

#![no_std]
#![deny(unsafe_code)]

pub mod buffer;
pub mod config;
pub mod flush;
pub mod pixel;
pub mod region;
pub mod sched;
pub mod traits;

pub use buffer::{AllocError, FrameBufferAllocator, FALLBACK_ROW_PIXELS};
pub use config::{BridgeConfig, DisplayGeometry};
pub use flush::{FlushController, FlushError};
pub use region::DirtyRegion;
pub use traits::{DeviceTransport, RenderStep, TickClock, TransportError};
