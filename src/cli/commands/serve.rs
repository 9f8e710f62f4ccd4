//! Serve command implementation

use crate::api::{self, AppState};
use crate::cli::{EXIT_FATAL, EXIT_OK};
use crate::config::load_config;
use crate::core::sync::SyncOrchestrator;
use clap::Args;
use tokio::sync::watch;

/// Arguments for the serve command
#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Override the listen address
    #[arg(long)]
    pub host: Option<String>,

    /// Override the listen port
    #[arg(long)]
    pub port: Option<u16>,
}

impl ServeArgs {
    /// Execute the serve command
    pub async fn execute(
        &self,
        config_path: Option<&str>,
        mut shutdown_signal: watch::Receiver<bool>,
    ) -> anyhow::Result<i32> {
        let mut config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load configuration");
                eprintln!("{e}");
                return Ok(EXIT_FATAL);
            }
        };

        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }

        // Credentials are loaded here so a bad key fails before the port opens
        let orchestrator = match SyncOrchestrator::from_config(&config) {
            Ok(o) => o,
            Err(e) => {
                tracing::error!(error = %e, "Failed to initialize sync pipeline");
                eprintln!("{e}");
                return Ok(EXIT_FATAL);
            }
        };

        tracing::info!(
            version = env!("CARGO_PKG_VERSION"),
            calendar_id = %config.calendar.calendar_id,
            policy = %config.calendar.existing_event_policy,
            dry_run = config.sync.dry_run,
            "Starting calbridge server"
        );

        let shutdown = async move {
            loop {
                if shutdown_signal.changed().await.is_err() {
                    // No signal handler is left to notify us
                    std::future::pending::<()>().await;
                }
                if *shutdown_signal.borrow() {
                    break;
                }
            }
            tracing::info!("Shutdown signal received, draining in-flight requests");
        };

        api::serve(&config.server, AppState::new(orchestrator), shutdown).await?;

        Ok(EXIT_OK)
    }
}
