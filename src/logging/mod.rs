//! Logging and observability
//!
//! Structured logging via `tracing`, with:
//! - plain or JSON console output
//! - configurable log levels (`RUST_LOG` wins when set)
//! - optional local JSON file logging with rotation
//!
//! Each sync run is wrapped in a `sync_run` span carrying a `run_id`, so every
//! event it emits can be correlated.
//!
//! # Example
//!
//! ```no_run
//! use calbridge::logging::init_logging;
//! use calbridge::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging(&config).expect("Failed to initialize logging");
//!
//! tracing::info!(appointment_id = "apt_1", "Appointment synced");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};
