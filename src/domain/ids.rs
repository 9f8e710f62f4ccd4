//! Identifier newtypes
//!
//! Two kinds of ids move through a sync run: the appointment id issued by the
//! third-party source, and the event id issued by Google Calendar. Keeping them
//! as distinct types prevents passing one where the other is expected.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Appointment identifier issued by the third-party source
///
/// This is the deduplication key stored on every calendar event.
///
/// # Examples
///
/// ```
/// use calbridge::domain::ids::AppointmentId;
/// use std::str::FromStr;
///
/// let id = AppointmentId::from_str("apt_1").unwrap();
/// assert_eq!(id.as_str(), "apt_1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct AppointmentId(String);

impl AppointmentId {
    /// Creates a new AppointmentId, rejecting blank values
    pub fn new(id: impl Into<String>) -> Result<Self, String> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err("Appointment ID cannot be empty".to_string());
        }
        Ok(Self(id))
    }

    /// Returns the appointment ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AppointmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for AppointmentId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for AppointmentId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Scheduling systems disagree on whether ids are strings or integers, so both
/// are accepted and normalized to a string.
impl<'de> Deserialize<'de> for AppointmentId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Number(serde_json::Number),
        }

        let raw = match RawId::deserialize(deserializer)? {
            RawId::Text(s) => s,
            RawId::Number(n) => n.to_string(),
        };
        AppointmentId::new(raw).map_err(serde::de::Error::custom)
    }
}

/// Google Calendar event identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(String);

impl EventId {
    /// Creates a new EventId, rejecting blank values
    pub fn new(id: impl Into<String>) -> Result<Self, String> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err("Event ID cannot be empty".to_string());
        }
        Ok(Self(id))
    }

    /// Returns the event ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for EventId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
