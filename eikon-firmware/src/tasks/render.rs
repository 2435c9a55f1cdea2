//! Render loop task
//!
//! The cooperative loop at the root of the pipeline: one renderer
//! step, then a short timer yield. The timer is the only suspension
//! point; every flush a step triggers has fully completed, ack
//! included, before the next step runs.

use defmt::*;
use embassy_time::{Instant, Timer};

use eikon_core::sched::RenderScheduler;
use eikon_core::traits::TickClock;

use crate::renderer::PatternRenderer;

/// Monotonic milliseconds from Embassy's time driver
pub struct EmbassyClock {
    start: Instant,
}

impl EmbassyClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl TickClock for EmbassyClock {
    fn elapsed_ms(&self) -> u32 {
        self.start.elapsed().as_millis() as u32
    }
}

/// Render task - runs the cooperative scheduler for the process lifetime
#[embassy_executor::task]
pub async fn render_task(
    mut sched: RenderScheduler<EmbassyClock>,
    mut renderer: PatternRenderer,
) {
    info!("Render task started");

    loop {
        let delay_ms = sched.run_once(&mut renderer);
        Timer::after_millis(delay_ms as u64).await;
    }
}
