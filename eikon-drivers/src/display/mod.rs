//! Display transports

pub mod axs15231b;

pub use axs15231b::Axs15231b;
