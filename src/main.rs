// calbridge - Appointment to Google Calendar Sync Bridge
// Copyright (c) 2025 calbridge Contributors
// Licensed under the MIT License

use calbridge::cli::{Cli, Commands, EXIT_FATAL};
use calbridge::config::{load_config, LoggingConfig};
use calbridge::logging::init_logging;
use clap::Parser;
use std::process;
use tokio::sync::watch;

#[tokio::main]
async fn main() {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let logging_config = logging_config(&cli);
    let guard = match init_logging(&logging_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(EXIT_FATAL);
        }
    };

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "calbridge - Appointment to Google Calendar sync"
    );

    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    tokio::spawn(async move {
        #[cfg(unix)]
        {
            use tokio::signal::unix::{signal, SignalKind};
            let mut sigterm = match signal(SignalKind::terminate()) {
                Ok(s) => s,
                Err(e) => {
                    tracing::error!(error = %e, "Failed to install SIGTERM handler");
                    return;
                }
            };

            tokio::select! {
                _ = tokio::signal::ctrl_c() => {
                    tracing::info!("Received SIGINT (Ctrl+C), initiating graceful shutdown...");
                }
                _ = sigterm.recv() => {
                    tracing::info!("Received SIGTERM, initiating graceful shutdown...");
                }
            }
            let _ = shutdown_tx.send(true);
        }

        #[cfg(not(unix))]
        {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            } else {
                tracing::info!("Received SIGINT (Ctrl+C), initiating graceful shutdown...");
                let _ = shutdown_tx.send(true);
            }
        }
    });

    let exit_code = match execute_command(&cli, shutdown_rx).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Command execution failed");
            eprintln!("Error: {e}");
            EXIT_FATAL
        }
    };

    // process::exit skips destructors; flush file logs first
    drop(guard);
    process::exit(exit_code);
}

/// Logging settings from the configuration, falling back to defaults when it
/// does not load; the command itself reports configuration errors.
fn logging_config(cli: &Cli) -> LoggingConfig {
    let mut config = load_config(cli.config.as_deref())
        .map(|c| c.logging)
        .unwrap_or_else(|_| {
            let mut fallback = LoggingConfig::default();
            if let Ok(level) = std::env::var("CALBRIDGE_LOG_LEVEL") {
                fallback.level = level;
            }
            fallback
        });

    if let Some(level) = &cli.log_level {
        config.level = level.clone();
    }
    config
}

/// Execute the CLI command
async fn execute_command(cli: &Cli, shutdown_signal: watch::Receiver<bool>) -> anyhow::Result<i32> {
    let config_path = cli.config.as_deref();
    match &cli.command {
        Commands::Serve(args) => args.execute(config_path, shutdown_signal).await,
        Commands::Sync(args) => args.execute(config_path).await,
        Commands::ValidateConfig(args) => args.execute(config_path).await,
    }
}
