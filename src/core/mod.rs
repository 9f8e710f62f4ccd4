//! Core business logic for calbridge.
//!
//! # Modules
//!
//! - [`mapper`] - Appointment to calendar event mapping
//! - [`resolver`] - Lookup of the event already mirroring an appointment
//! - [`writer`] - Create or update, governed by the existing-event policy
//! - [`sync`] - Orchestration and the per-run summary
//!
//! # Sync Workflow
//!
//! 1. **Fetch**: Pull appointments from the third-party API (abort on failure)
//! 2. **Map**: Build the calendar event for each appointment
//! 3. **Resolve**: Find an event already carrying the appointment id
//! 4. **Upsert**: Insert or update it
//! 5. **Report**: Return the [`sync::SyncResult`]
//!
//! Steps 2 to 4 run one appointment at a time; a failure there is counted
//! and the batch continues.
//!
//! # Example
//!
//! ```rust,no_run
//! use calbridge::config::load_config;
//! use calbridge::core::sync::SyncOrchestrator;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config(None::<&str>)?;
//! let orchestrator = SyncOrchestrator::from_config(&config)?;
//!
//! let result = orchestrator.run_sync(None).await?;
//! println!("Created: {}", result.created);
//! println!("Updated: {}", result.updated);
//! println!("Failed: {}", result.failed);
//! # Ok(())
//! # }
//! ```

pub mod mapper;
pub mod resolver;
pub mod sync;
pub mod writer;
