//! # Observability
//!
//! Library code emits `tracing` events; binaries install a subscriber with
//! [`init_logging`]. Events go to stderr.

pub mod logging;

pub use logging::{init_logging, LogConfig, LogFormat, LogLevel};
