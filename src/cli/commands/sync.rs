//! Sync command implementation
//!
//! Runs the same pipeline as `POST /sync` once and prints the result JSON.

use crate::api::routes::parse_updated_since;
use crate::cli::{EXIT_FATAL, EXIT_OK, EXIT_PARTIAL, EXIT_SOURCE_FAILED};
use crate::config::load_config;
use crate::core::sync::{SyncOrchestrator, SyncResult};
use crate::domain::BridgeError;
use clap::Args;

/// Arguments for the sync command
#[derive(Args, Debug)]
pub struct SyncArgs {
    /// Only sync appointments updated since this ISO 8601 timestamp
    #[arg(long, value_name = "TIMESTAMP")]
    pub updated_since: Option<String>,

    /// Resolve and report without writing to the calendar
    #[arg(long)]
    pub dry_run: bool,
}

impl SyncArgs {
    /// Execute the sync command
    pub async fn execute(&self, config_path: Option<&str>) -> anyhow::Result<i32> {
        let updated_since = match self.updated_since.as_deref().map(parse_updated_since) {
            Some(Ok(ts)) => Some(ts),
            Some(Err(e)) => {
                eprintln!("{e}");
                return Ok(EXIT_FATAL);
            }
            None => None,
        };

        let mut config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load configuration");
                eprintln!("{e}");
                return Ok(EXIT_FATAL);
            }
        };

        if self.dry_run {
            tracing::info!("Enabling dry-run mode from CLI");
            config.sync.dry_run = true;
        }

        let orchestrator = match SyncOrchestrator::from_config(&config) {
            Ok(o) => o,
            Err(e) => {
                tracing::error!(error = %e, "Failed to initialize sync pipeline");
                eprintln!("{e}");
                return Ok(EXIT_FATAL);
            }
        };

        match orchestrator.run_sync(updated_since).await {
            Ok(result) => {
                println!("{}", serde_json::to_string_pretty(&result)?);
                Ok(exit_code(&result))
            }
            Err(e) => {
                eprintln!("Sync aborted: {e}");
                Ok(abort_exit_code(&e))
            }
        }
    }
}

fn exit_code(result: &SyncResult) -> i32 {
    if result.is_successful() {
        EXIT_OK
    } else {
        EXIT_PARTIAL
    }
}

fn abort_exit_code(error: &BridgeError) -> i32 {
    if error.is_fetch_abort() {
        EXIT_SOURCE_FAILED
    } else {
        EXIT_FATAL
    }
}
