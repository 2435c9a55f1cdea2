//! Cooperative render scheduler
//!
//! Single logical thread of control, no preemption. Each iteration
//! runs the renderer's tick-and-paint step (which may flush regions
//! synchronously) and then yields for a short fixed delay. The
//! unbounded loop itself lives in the firmware task, which is the
//! only place the process suspends; this type just owns the clock
//! and the interval.

use crate::config::DEFAULT_TICK_INTERVAL_MS;
use crate::traits::{RenderStep, TickClock};

/// Drives the renderer one cooperative step at a time
pub struct RenderScheduler<C> {
    clock: C,
    tick_interval_ms: u32,
}

impl<C: TickClock> RenderScheduler<C> {
    /// Create a scheduler with the default sub-10ms tick interval
    pub fn new(clock: C) -> Self {
        Self::with_interval(clock, DEFAULT_TICK_INTERVAL_MS)
    }

    /// Create a scheduler with a custom tick interval
    pub fn with_interval(clock: C, tick_interval_ms: u32) -> Self {
        Self {
            clock,
            tick_interval_ms,
        }
    }

    /// Current monotonic time in milliseconds
    pub fn now_ms(&self) -> u32 {
        self.clock.elapsed_ms()
    }

    /// Run one scheduler iteration
    ///
    /// Invokes the renderer's step with the current time and returns
    /// the delay in milliseconds the caller must yield before the
    /// next iteration. All flushes triggered by the step have fully
    /// completed (acks included) when this returns.
    pub fn run_once<R: RenderStep>(&mut self, renderer: &mut R) -> u32 {
        renderer.step(self.clock.elapsed_ms());
        self.tick_interval_ms
    }
}
