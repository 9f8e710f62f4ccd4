//! Calendar writes (create or update)

use crate::adapters::google::CalendarGateway;
use crate::config::ExistingEventPolicy;
use crate::domain::{CalendarEvent, ExistingEvent, Result};
use std::fmt;
use std::sync::Arc;

/// What an upsert did (or, in a dry run, would have done)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Created,
    Updated,
    Skipped,
}

impl fmt::Display for UpsertOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Created => "created",
            Self::Updated => "updated",
            Self::Skipped => "skipped",
        };
        f.write_str(s)
    }
}

/// Writes mapped events to the calendar
pub struct CalendarWriter {
    calendar: Arc<dyn CalendarGateway>,
    policy: ExistingEventPolicy,
    dry_run: bool,
}

impl CalendarWriter {
    pub fn new(calendar: Arc<dyn CalendarGateway>, policy: ExistingEventPolicy) -> Self {
        Self {
            calendar,
            policy,
            dry_run: false,
        }
    }

    /// Report outcomes without calling the calendar
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Insert `event`, or replace `existing` with it
    ///
    /// With an existing event, the configured [`ExistingEventPolicy`] decides
    /// between a full replace and a skip.
    ///
    /// # Errors
    ///
    /// Propagates [`BridgeError::CalendarUnavailable`](crate::domain::BridgeError::CalendarUnavailable)
    /// from the gateway. Nothing is retried.
    pub async fn upsert(
        &self,
        event: &CalendarEvent,
        existing: Option<&ExistingEvent>,
    ) -> Result<UpsertOutcome> {
        let Some(existing) = existing else {
            if self.dry_run {
                tracing::info!(
                    appointment_id = %event.source_appointment_id(),
                    "Dry run: would create event"
                );
            } else {
                let event_id = self.calendar.insert_event(event).await?;
                tracing::debug!(
                    appointment_id = %event.source_appointment_id(),
                    event_id = %event_id,
                    "Created event"
                );
            }
            return Ok(UpsertOutcome::Created);
        };

        let skip = match self.policy {
            ExistingEventPolicy::Update => false,
            ExistingEventPolicy::UpdateIfChanged => existing.matches(event),
            ExistingEventPolicy::Skip => true,
        };

        if skip {
            tracing::debug!(
                appointment_id = %event.source_appointment_id(),
                event_id = %existing.id,
                policy = %self.policy,
                "Leaving existing event unchanged"
            );
            return Ok(UpsertOutcome::Skipped);
        }

        if self.dry_run {
            tracing::info!(
                appointment_id = %event.source_appointment_id(),
                event_id = %existing.id,
                "Dry run: would update event"
            );
        } else {
            self.calendar.update_event(&existing.id, event).await?;
            tracing::debug!(
                appointment_id = %event.source_appointment_id(),
                event_id = %existing.id,
                "Updated event"
            );
        }

        Ok(UpsertOutcome::Updated)
    }
}
