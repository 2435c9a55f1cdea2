//! Embassy tasks

pub mod render;

pub use render::{render_task, EmbassyClock};
