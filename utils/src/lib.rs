//! Shared utilities for the voting token workspace.

pub mod logging;
pub mod time;

pub use logging::{init_logging, LogFormat};
pub use time::format_duration;
