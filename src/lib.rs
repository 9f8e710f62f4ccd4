// calbridge - Appointment to Google Calendar Sync Bridge
// Copyright (c) 2025 calbridge Contributors
// Licensed under the MIT License

//! # calbridge - Appointment to Google Calendar sync
//!
//! calbridge pulls appointments from a third-party scheduling API and mirrors
//! them as events on a single Google Calendar. Sync is one-way and stateless:
//! each event carries the id of the appointment it mirrors in a private
//! extended property, and that marker is the only dedup key.
//!
//! ## Overview
//!
//! - **Fetching** appointments over HTTP Basic Auth, optionally incrementally
//! - **Mapping** each appointment onto a calendar event
//! - **Resolving** the event that already mirrors an appointment, if any
//! - **Writing** inserts or full updates through the Calendar v3 API
//! - **Serving** `GET /health` and `POST /sync` over HTTP
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`api`] - HTTP surface (axum)
//! - [`core`] - Sync pipeline (map, resolve, write, orchestrate)
//! - [`adapters`] - External integrations (appointment source, Google Calendar)
//! - [`domain`] - Core domain types and errors
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging and observability
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use calbridge::config::load_config;
//! use calbridge::core::sync::SyncOrchestrator;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Environment variables, optionally layered over a TOML file
//!     let config = load_config(None::<&str>)?;
//!
//!     let orchestrator = SyncOrchestrator::from_config(&config)?;
//!     let result = orchestrator.run_sync(None).await?;
//!
//!     println!("{}", serde_json::to_string(&result)?);
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Library code returns [`domain::Result`] with [`domain::BridgeError`]. A
//! failed fetch aborts the run; any failure on a single appointment is
//! counted in the [`core::sync::SyncResult`] and the batch continues.
//!
//! ## Logging
//!
//! calbridge uses structured logging with the `tracing` crate:
//!
//! ```rust,no_run
//! use tracing::{info, warn};
//!
//! info!(appointment_id = "apt_1", event_id = "evt_1", "Updated event");
//! warn!(appointment_id = "apt_2", "Failed to sync appointment");
//! ```

pub mod adapters;
pub mod api;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
