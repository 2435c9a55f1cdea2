//! Eikon - Display Bridge Firmware
//!
//! Main firmware binary for RP2040 boards driving an AXS15231B-class
//! TFT panel. Brings up the SPI bus, reserves the memory pools,
//! allocates the pipeline buffers, and hands everything to the
//! cooperative render task.
//!
//! Allocation policy decided once, here, at startup:
//! - draw buffer from the large pool: failure is fatal, the process
//!   parks and the panel stays blank
//! - row buffer from the fast pool: failure degrades to the static
//!   fallback row, refresh may be slower but output stays correct

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::gpio::{Level, Output};
use embassy_rp::spi::{self, Spi};
use embassy_time::Timer;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use eikon_core::buffer::{
    ArenaPool, FrameBufferAllocator, RowBufferSource, FALLBACK_ROW_PIXELS,
};
use eikon_core::config::BridgeConfig;
use eikon_core::flush::FlushController;
use eikon_core::sched::RenderScheduler;
use eikon_drivers::Axs15231b;

use crate::bus::SoftCsDevice;
use crate::renderer::PatternRenderer;
use crate::tasks::EmbassyClock;

mod bus;
mod renderer;
mod tasks;

/// Large pool arena, sized for the 1/10th-screen draw buffer.
/// Stands in for external RAM on boards that have it.
const LARGE_ARENA_PIXELS: usize = 320 * 480 / 10;

/// Fast pool arena for the transfer row. All RP2040 SRAM is
/// DMA-eligible; on split-memory chips this would sit in the
/// DMA-capable region.
const FAST_ARENA_PIXELS: usize = 320;

// Pool arenas and the fallback row (must live forever)
static LARGE_ARENA: StaticCell<[u16; LARGE_ARENA_PIXELS]> = StaticCell::new();
static FAST_ARENA: StaticCell<[u16; FAST_ARENA_PIXELS]> = StaticCell::new();
static FALLBACK_ROW: StaticCell<[u16; FALLBACK_ROW_PIXELS]> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Eikon firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = BridgeConfig::default();
    if let Err(e) = config.validate() {
        error!("FATAL: invalid bridge configuration: {}", e);
        halt().await;
    }
    info!(
        "Panel {}x{}, draw fraction 1/{}, tick {}ms",
        config.geometry.width,
        config.geometry.height,
        config.draw_buffer_fraction,
        config.tick_interval_ms
    );

    // Setup SPI for the panel. Reset and power-on init sequencing
    // happen in board bring-up before this transport takes over.
    let mut spi_config = spi::Config::default();
    spi_config.frequency = 40_000_000;
    let spi_bus = Spi::new_blocking(p.SPI0, p.PIN_18, p.PIN_19, p.PIN_16, spi_config);
    let cs = Output::new(p.PIN_17, Level::High);
    let dc = Output::new(p.PIN_20, Level::High);

    // Blocking bus, no DMA channel wired up yet; the transport
    // serves DMA-requested pushes synchronously.
    let transport = Axs15231b::new(SoftCsDevice::new(spi_bus, cs), dc, false);
    info!("Display transport initialized");

    // Reserve the pools and allocate the pipeline buffers
    let large_mem: &'static mut [u16] = LARGE_ARENA.init([0; LARGE_ARENA_PIXELS]);
    let fast_mem: &'static mut [u16] = FAST_ARENA.init([0; FAST_ARENA_PIXELS]);
    let fallback_mem: &'static mut [u16] = FALLBACK_ROW.init([0; FALLBACK_ROW_PIXELS]);

    let mut allocator = FrameBufferAllocator::new(
        ArenaPool::new(large_mem),
        ArenaPool::new(fast_mem),
        fallback_mem,
    );

    let draw = match allocator.draw_buffer(&config.geometry, config.draw_buffer_fraction) {
        Ok(buf) => {
            info!(
                "Draw buffer allocated ({} bytes, stride {}, {} rows)",
                buf.capacity_bytes(),
                buf.stride,
                buf.rows
            );
            buf
        }
        Err(e) => {
            error!("FATAL: draw buffer allocation failed: {}", e);
            halt().await;
        }
    };

    let row = match allocator.row_buffer(config.geometry.width as usize) {
        Ok(row) => {
            match row.source {
                RowBufferSource::FastPool => {
                    info!("Transfer row buffer allocated ({} bytes)", row.capacity() * 2)
                }
                RowBufferSource::StaticFallback => {
                    warn!("Fast pool exhausted, using static fallback row buffer")
                }
            }
            row
        }
        Err(e) => {
            error!("FATAL: transfer row buffer unusable: {}", e);
            halt().await;
        }
    };

    let controller = FlushController::new(transport, config.geometry);
    let renderer = PatternRenderer::new(controller, draw, row);
    let sched = RenderScheduler::with_interval(EmbassyClock::new(), config.tick_interval_ms);

    spawner.spawn(tasks::render_task(sched, renderer)).unwrap();
    info!("Render task spawned, firmware running");

    // Main task has nothing else to do - the render task owns the pipeline
    loop {
        Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}

/// Park forever - halted process, static panel, no further device writes
async fn halt() -> ! {
    loop {
        Timer::after_secs(1).await;
    }
}
