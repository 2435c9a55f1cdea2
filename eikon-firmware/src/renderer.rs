//! Built-in test pattern renderer
//!
//! Stand-in for an external retained-mode renderer (LVGL-class): it
//! owns the partial draw buffer, paints into it, and hands dirty
//! regions to the flush controller the same way a real renderer's
//! flush callback would. Paints a moving horizontal color band, one
//! draw-buffer-sized stripe per repaint.

use defmt::*;

use eikon_core::buffer::{DrawBuffer, TransferRowBuffer};
use eikon_core::flush::FlushController;
use eikon_core::region::DirtyRegion;
use eikon_core::traits::RenderStep;

use crate::bus::PanelTransport;

/// Milliseconds between repaints
const REPAINT_INTERVAL_MS: u32 = 40;

/// RGB565 color bars cycled across bands
const BARS: [u16; 4] = [0xF800, 0x07E0, 0x001F, 0xFFFF];

pub struct PatternRenderer {
    controller: FlushController<PanelTransport>,
    draw: DrawBuffer<'static>,
    row: TransferRowBuffer<'static>,
    band: u32,
    last_paint_ms: u32,
}

impl PatternRenderer {
    pub fn new(
        controller: FlushController<PanelTransport>,
        draw: DrawBuffer<'static>,
        row: TransferRowBuffer<'static>,
    ) -> Self {
        Self {
            controller,
            draw,
            row,
            band: 0,
            last_paint_ms: 0,
        }
    }
}

impl RenderStep for PatternRenderer {
    fn step(&mut self, now_ms: u32) {
        if now_ms.wrapping_sub(self.last_paint_ms) < REPAINT_INTERVAL_MS && self.band > 0 {
            return;
        }
        self.last_paint_ms = now_ms;

        let geometry = *self.controller.geometry();
        let width = geometry.width;
        let bands_per_screen = (geometry.height as usize).div_ceil(self.draw.rows) as u32;

        // Paint one full-width band into the draw buffer
        let color = BARS[(self.band % BARS.len() as u32) as usize];
        self.draw.pixels.fill(color);

        // Band position, clipped to the panel at the bottom edge
        let y1 = ((self.band % bands_per_screen) as usize * self.draw.rows) as u16;
        let rows = self.draw.rows.min(geometry.height as usize - y1 as usize);
        let region = DirtyRegion::new(0, y1, width - 1, y1 + rows as u16 - 1);

        let mut acked = false;
        let result = self.controller.flush_region(
            region,
            &self.draw.pixels[..width as usize * rows],
            &mut self.row,
            || acked = true,
        );
        if let Err(e) = result {
            // Visual content of this band is undefined for the
            // cycle; the renderer keeps going.
            warn!("flush fault on band {}: {}", self.band, e);
        }
        debug_assert!(acked);

        self.band = self.band.wrapping_add(1);
    }
}
