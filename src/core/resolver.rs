//! Duplicate resolution against the target calendar

use crate::adapters::google::CalendarGateway;
use crate::domain::{AppointmentId, ExistingEvent, Result};
use std::sync::Arc;

/// Finds the calendar event already mirroring an appointment
pub struct DuplicateResolver {
    calendar: Arc<dyn CalendarGateway>,
}

impl DuplicateResolver {
    pub fn new(calendar: Arc<dyn CalendarGateway>) -> Self {
        Self { calendar }
    }

    /// Look up the event carrying `source_id` as its private marker
    ///
    /// Returns the first match in API order, or `None`. More than one match
    /// means an earlier run raced or someone copied an event; every matching
    /// id is logged and the first one wins.
    ///
    /// # Errors
    ///
    /// Propagates [`BridgeError::CalendarUnavailable`](crate::domain::BridgeError::CalendarUnavailable)
    /// from the gateway.
    pub async fn find_existing(&self, source_id: &AppointmentId) -> Result<Option<ExistingEvent>> {
        let matches = self.calendar.find_by_source_id(source_id).await?;

        if matches.len() > 1 {
            let event_ids: Vec<&str> = matches.iter().map(|e| e.id.as_str()).collect();
            tracing::warn!(
                appointment_id = %source_id,
                calendar_id = %self.calendar.calendar_id(),
                match_count = matches.len(),
                event_ids = ?event_ids,
                "Multiple calendar events carry the same source appointment id, using the first"
            );
        }

        Ok(matches.into_iter().next())
    }
}
