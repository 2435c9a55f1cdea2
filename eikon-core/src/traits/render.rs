//! Renderer-facing traits
//!
//! The retained-mode renderer is an external collaborator; the
//! scheduler only needs a tick source and a single step entry point.

/// Monotonic millisecond clock
///
/// Satisfies the renderer's internal timing needs (animation,
/// timers). Wraps after ~49 days, which the renderer tolerates.
pub trait TickClock {
    /// Milliseconds elapsed since an arbitrary fixed origin
    fn elapsed_ms(&self) -> u32;
}

/// One cooperative tick of the renderer
pub trait RenderStep {
    /// Run the renderer's tick-and-paint step
    ///
    /// May synchronously invoke the flush controller zero or more
    /// times before returning. Never reentered: each flush completes,
    /// acknowledgment included, before the next begins.
    fn step(&mut self, now_ms: u32);
}
