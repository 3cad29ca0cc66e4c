//! Logging and observability
//!
//! Structured logging via `tracing`, with console output and optional
//! JSON file logs with rotation.

pub mod structured;

pub use structured::{init_logging, LoggingGuard};
