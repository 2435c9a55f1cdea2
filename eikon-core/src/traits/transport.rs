//! Device transport trait
//!
//! Abstracts the panel's window-addressing command and pixel push
//! operation, hiding the underlying bus.

/// Errors that can occur on the display bus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransportError {
    /// Bus-level fault (SPI write failed, D/C line stuck, ...)
    Bus,
    /// Window coordinates the device cannot address
    InvalidWindow,
}

/// Transport to a serial display device
///
/// The device's addressed window auto-increments in raster order:
/// after `set_window`, pushed pixels fill the window left-to-right,
/// top-to-bottom. Callers must preserve that order.
pub trait DeviceTransport {
    /// Program the device's addressable window
    ///
    /// Must be called exactly once per dirty region, before any pixel
    /// push for that region. Bus faults are not individually
    /// recoverable; the caller treats them as fatal for the cycle.
    fn set_window(&mut self, x: u16, y: u16, w: u16, h: u16) -> Result<(), TransportError>;

    /// Transmit one row of device-byte-order pixels
    ///
    /// If `use_dma` is requested but the transport has no DMA
    /// channel, it falls back to a synchronous transfer
    /// transparently. Either way the call is logically synchronous:
    /// the pixels have been accepted when it returns.
    fn push_row(&mut self, pixels: &[u16], use_dma: bool) -> Result<(), TransportError>;
}
