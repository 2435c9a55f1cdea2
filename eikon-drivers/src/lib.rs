//! Display transport implementations
//!
//! This crate provides concrete implementations of the
//! `DeviceTransport` trait defined in eikon-core:
//!
//! - AXS15231B TFT controller over SPI (Guition 3.5" class panels)

#![no_std]
#![deny(unsafe_code)]

pub mod display;

pub use display::Axs15231b;
