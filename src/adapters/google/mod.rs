//! Google Calendar integration
//!
//! [`CalendarGateway`] is the narrow surface the sync pipeline needs from a
//! calendar: look events up by their source appointment id, insert, and
//! replace. [`GoogleCalendarClient`] implements it over the Calendar v3 REST
//! API with service-account authentication.

pub mod auth;
pub mod client;
pub mod models;

pub use auth::{AccessTokenProvider, ServiceAccountAuth, StaticTokenProvider};
pub use client::GoogleCalendarClient;
pub use models::ServiceAccountKey;

use crate::domain::{AppointmentId, CalendarEvent, EventId, ExistingEvent, Result};
use async_trait::async_trait;

/// Calendar operations used by the sync pipeline
///
/// Every failure is reported as
/// [`BridgeError::CalendarUnavailable`](crate::domain::BridgeError::CalendarUnavailable)
/// so that the orchestrator can count it against a single appointment.
#[async_trait]
pub trait CalendarGateway: Send + Sync {
    /// Events whose private `source_appointment_id` equals `source_id`,
    /// in the order the calendar returns them
    async fn find_by_source_id(&self, source_id: &AppointmentId) -> Result<Vec<ExistingEvent>>;

    /// Create a new event, returning its id
    async fn insert_event(&self, event: &CalendarEvent) -> Result<EventId>;

    /// Replace every managed field of an existing event
    async fn update_event(&self, event_id: &EventId, event: &CalendarEvent) -> Result<EventId>;

    /// Target calendar, for logging
    fn calendar_id(&self) -> &str;
}
