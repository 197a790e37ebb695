//! Logging setup
//!
//! Installs a global `tracing` subscriber writing to stderr so stdout stays
//! free for command output.

mod logging;

pub use logging::{TelemetryError, build_filter, init_logging};
