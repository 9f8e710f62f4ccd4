//! Sync result counters and reporting

use crate::core::writer::UpsertOutcome;
use crate::domain::{AppointmentId, BridgeError};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Outcome of one sync run
///
/// Serializes to exactly
/// `{"fetched","created","updated","skipped","failed","errors"}`; timing is
/// logged but not part of the payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncResult {
    /// Appointments returned by the source
    pub fetched: usize,

    /// Events inserted
    pub created: usize,

    /// Existing events replaced
    pub updated: usize,

    /// Existing events left untouched by policy
    pub skipped: usize,

    /// Appointments that could not be mapped, looked up, or written
    pub failed: usize,

    /// One `"<appointment id>: <error>"` line per failure
    pub errors: Vec<String>,

    #[serde(skip)]
    pub duration: Duration,
}

impl SyncResult {
    /// Create an empty result for a fetched batch
    pub fn new(fetched: usize) -> Self {
        Self {
            fetched,
            ..Default::default()
        }
    }

    /// Set the duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Count a successful upsert
    pub fn record_outcome(&mut self, outcome: UpsertOutcome) {
        match outcome {
            UpsertOutcome::Created => self.created += 1,
            UpsertOutcome::Updated => self.updated += 1,
            UpsertOutcome::Skipped => self.skipped += 1,
        }
    }

    /// Count a failed appointment and keep its message
    pub fn record_failure(&mut self, appointment_id: &AppointmentId, error: &BridgeError) {
        self.failed += 1;
        self.errors.push(format!("{appointment_id}: {error}"));
    }

    /// Appointments accounted for so far
    pub fn processed(&self) -> usize {
        self.created + self.updated + self.skipped + self.failed
    }

    /// Check if every fetched appointment made it to the calendar
    pub fn is_successful(&self) -> bool {
        self.failed == 0
    }

    /// Log the summary
    pub fn log_summary(&self) {
        tracing::info!(
            fetched = self.fetched,
            created = self.created,
            updated = self.updated,
            skipped = self.skipped,
            failed = self.failed,
            duration_ms = self.duration.as_millis() as u64,
            "Sync completed"
        );

        if !self.errors.is_empty() {
            tracing::warn!(
                error_count = self.errors.len(),
                "Sync completed with errors"
            );
            for error in &self.errors {
                tracing::warn!(message = %error, "Sync error");
            }
        }
    }
}
