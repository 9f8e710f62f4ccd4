//! Sync runs
//!
//! - [`orchestrator`] - Runs the fetch, map, resolve, upsert pipeline
//! - [`summary`] - Per-run counters and error list

pub mod orchestrator;
pub mod summary;

pub use orchestrator::SyncOrchestrator;
pub use summary::SyncResult;
