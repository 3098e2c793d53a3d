//! # spelunk-utils
//!
//! Shared utilities for the Spelunk workspace.
//!
//! Currently this is the logging bootstrap built on `tracing`; tools and
//! examples call [`init_logging`] once at startup and use the `tracing`
//! macros everywhere else.

pub mod logging;

// Re-export commonly used logging functions for convenience
pub use logging::{init_logging, init_logging_with_level, LogFormat, LogLevel};
pub use tracing::{debug, error, info, trace, warn};
