//! Source appointment model
//!
//! A `SourceAppointment` is one record from the third-party scheduling API.
//! Deserialization enforces the payload shape: an id must be present and any
//! timestamp that is present must parse with its offset. Whether the record is
//! usable as an event (both timestamps present, ordered) is the mapper's call.

use super::ids::AppointmentId;
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// Title used when the source omits one
pub const DEFAULT_TITLE: &str = "Appointment";

fn default_title() -> String {
    DEFAULT_TITLE.to_string()
}

/// An appointment as fetched from the third-party API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceAppointment {
    /// Source-unique identifier, carried onto the calendar event
    pub id: AppointmentId,

    #[serde(default = "default_title")]
    pub title: String,

    #[serde(default)]
    pub description: Option<String>,

    /// Start timestamp with its original offset
    #[serde(default)]
    pub start_time: Option<DateTime<FixedOffset>>,

    /// End timestamp with its original offset
    #[serde(default)]
    pub end_time: Option<DateTime<FixedOffset>>,
}

impl SourceAppointment {
    /// Create an appointment with both timestamps set
    pub fn new(
        id: AppointmentId,
        title: impl Into<String>,
        start_time: DateTime<FixedOffset>,
        end_time: DateTime<FixedOffset>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            description: None,
            start_time: Some(start_time),
            end_time: Some(end_time),
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}
