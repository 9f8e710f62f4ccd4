//! Third-party appointment source
//!
//! The [`AppointmentSource`] trait is the seam between the sync pipeline and
//! the scheduling API; [`HttpAppointmentSource`] is the production
//! implementation.

pub mod client;

pub use client::HttpAppointmentSource;

use crate::domain::{Result, SourceAppointment};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Source of appointment records
#[async_trait]
pub trait AppointmentSource: Send + Sync {
    /// Fetch appointments, optionally only those updated since a point in time
    ///
    /// # Errors
    ///
    /// - [`BridgeError::SourceUnavailable`](crate::domain::BridgeError::SourceUnavailable)
    ///   on network failure or a non-2xx response
    /// - [`BridgeError::MalformedResponse`](crate::domain::BridgeError::MalformedResponse)
    ///   when the body is not a JSON array of well-formed appointments
    async fn fetch(&self, updated_since: Option<DateTime<Utc>>) -> Result<Vec<SourceAppointment>>;

    /// Base URL of the source, for logging
    fn base_url(&self) -> &str;
}
