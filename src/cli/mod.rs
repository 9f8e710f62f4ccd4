//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for calbridge using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// Exit code for a completed run (or valid configuration)
pub const EXIT_OK: i32 = 0;
/// Exit code when a sync completed but some appointments failed
pub const EXIT_PARTIAL: i32 = 1;
/// Exit code when the appointment source could not be read
pub const EXIT_SOURCE_FAILED: i32 = 2;
/// Exit code for configuration and other fatal errors
pub const EXIT_FATAL: i32 = 5;

/// calbridge - appointment to Google Calendar sync bridge
#[derive(Parser, Debug)]
#[command(name = "calbridge")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to an optional TOML configuration file
    #[arg(short, long, env = "CALBRIDGE_CONFIG")]
    pub config: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long)]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP server
    Serve(commands::serve::ServeArgs),

    /// Run one sync and print the result
    Sync(commands::sync::SyncArgs),

    /// Validate configuration and credentials
    ValidateConfig(commands::validate::ValidateArgs),
}
