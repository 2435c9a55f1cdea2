//! SPI bus glue
//!
//! The panel hangs off a dedicated blocking SPI bus with a
//! software-driven chip select. This adapter exposes it as an
//! `embedded-hal` `SpiDevice` for the transport driver.

use embassy_rp::gpio::Output;
use embassy_rp::peripherals::SPI0;
use embassy_rp::spi::{Blocking, Spi};
use embassy_time::{block_for, Duration};
use embedded_hal::spi::{ErrorType, Operation, SpiDevice};

use eikon_drivers::Axs15231b;

/// The concrete panel transport used by this board
pub type PanelTransport = Axs15231b<SoftCsDevice, Output<'static>>;

/// Blocking SPI bus + software chip select as an `SpiDevice`
pub struct SoftCsDevice {
    spi: Spi<'static, SPI0, Blocking>,
    cs: Output<'static>,
}

impl SoftCsDevice {
    /// Wrap a configured bus; `cs` must start deasserted (high)
    pub fn new(spi: Spi<'static, SPI0, Blocking>, cs: Output<'static>) -> Self {
        Self { spi, cs }
    }
}

impl ErrorType for SoftCsDevice {
    type Error = embassy_rp::spi::Error;
}

impl SpiDevice for SoftCsDevice {
    fn transaction(&mut self, operations: &mut [Operation<'_, u8>]) -> Result<(), Self::Error> {
        self.cs.set_low();

        let mut result = Ok(());
        for op in operations.iter_mut() {
            result = match op {
                Operation::Read(buf) => self.spi.blocking_read(buf),
                Operation::Write(buf) => self.spi.blocking_write(buf),
                Operation::Transfer(read, write) => self.spi.blocking_transfer(read, write),
                Operation::TransferInPlace(buf) => self.spi.blocking_transfer_in_place(buf),
                Operation::DelayNs(ns) => {
                    block_for(Duration::from_micros((*ns as u64).div_ceil(1000)));
                    Ok(())
                }
            };
            if result.is_err() {
                break;
            }
        }

        self.cs.set_high();
        result
    }
}
