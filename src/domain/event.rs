//! Calendar event model
//!
//! `CalendarEvent` is the body written to Google Calendar. Its serde layout
//! follows the Calendar v3 `Event` resource, so it is sent and read back
//! without an intermediate DTO.

use super::ids::{AppointmentId, EventId};
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize, Serializer};

/// Private extended property key carrying the source appointment id
pub const SOURCE_ID_PROPERTY: &str = "source_appointment_id";

/// A timezone-aware event boundary (`{"dateTime": "..."}`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventDateTime {
    #[serde(rename = "dateTime", serialize_with = "serialize_rfc3339")]
    pub date_time: DateTime<FixedOffset>,
}

// Always `+00:00` rather than `Z`, keeping the offset exactly as received.
fn serialize_rfc3339<S>(value: &DateTime<FixedOffset>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&value.to_rfc3339())
}

impl From<DateTime<FixedOffset>> for EventDateTime {
    fn from(date_time: DateTime<FixedOffset>) -> Self {
        Self { date_time }
    }
}

/// Private extended properties
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrivateProperties {
    pub source_appointment_id: String,
}

/// Extended properties block of an event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtendedProperties {
    pub private: PrivateProperties,
}

/// A calendar event produced from a source appointment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    pub summary: String,
    pub description: String,
    pub start: EventDateTime,
    pub end: EventDateTime,
    pub extended_properties: ExtendedProperties,
}

impl CalendarEvent {
    /// Build an event tagged with the appointment id it mirrors
    ///
    /// This is the only constructor, so every event carries its dedup marker.
    pub fn for_appointment(
        source_id: &AppointmentId,
        summary: impl Into<String>,
        description: impl Into<String>,
        start: DateTime<FixedOffset>,
        end: DateTime<FixedOffset>,
    ) -> Self {
        Self {
            summary: summary.into(),
            description: description.into(),
            start: start.into(),
            end: end.into(),
            extended_properties: ExtendedProperties {
                private: PrivateProperties {
                    source_appointment_id: source_id.as_str().to_string(),
                },
            },
        }
    }

    /// The embedded source appointment id
    pub fn source_appointment_id(&self) -> &str {
        &self.extended_properties.private.source_appointment_id
    }
}

/// An event that already exists on the calendar
///
/// Google returns many more fields than we write; only the ones we manage are
/// kept, and each is optional because events edited by hand may lack them.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExistingEvent {
    pub id: EventId,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub start: Option<StoredDateTime>,
    #[serde(default)]
    pub end: Option<StoredDateTime>,
}

/// Event boundary as stored remotely; all-day events carry `date` only
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StoredDateTime {
    #[serde(rename = "dateTime", default)]
    pub date_time: Option<DateTime<FixedOffset>>,
}

impl ExistingEvent {
    /// Whether writing `event` would leave this event unchanged
    ///
    /// Instants are compared, not offsets, because Google may echo a
    /// `dateTime` in the calendar's zone.
    pub fn matches(&self, event: &CalendarEvent) -> bool {
        let same_instant = |stored: &Option<StoredDateTime>, wanted: &EventDateTime| {
            stored
                .as_ref()
                .and_then(|s| s.date_time)
                .map(|dt| dt == wanted.date_time)
                .unwrap_or(false)
        };

        self.summary.as_deref() == Some(event.summary.as_str())
            && self.description.as_deref().unwrap_or("") == event.description
            && same_instant(&self.start, &event.start)
            && same_instant(&self.end, &event.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(s: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(s).unwrap()
    }

    fn sample_event() -> CalendarEvent {
        CalendarEvent::for_appointment(
            &AppointmentId::new("apt_1").unwrap(),
            "Checkup",
            "",
            ts("2026-02-20T10:00:00+00:00"),
            ts("2026-02-20T10:30:00+00:00"),
        )
    }

    #[test]
    fn test_event_wire_format() {
        let json = serde_json::to_value(sample_event()).unwrap();

        assert_eq!(json["summary"], "Checkup");
        assert_eq!(json["description"], "");
        assert_eq!(json["start"]["dateTime"], "2026-02-20T10:00:00+00:00");
        assert_eq!(json["end"]["dateTime"], "2026-02-20T10:30:00+00:00");
        assert_eq!(
            json["extendedProperties"]["private"]["source_appointment_id"],
            "apt_1"
        );
    }

    #[test]
    fn test_event_preserves_offset() {
        let event = CalendarEvent::for_appointment(
            &AppointmentId::new("a").unwrap(),
            "s",
            "d",
            ts("2026-02-20T10:00:00-05:00"),
            ts("2026-02-20T11:00:00-05:00"),
        );
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["start"]["dateTime"], "2026-02-20T10:00:00-05:00");
    }

    #[test]
    fn test_existing_event_deserialize_partial() {
        let existing: ExistingEvent = serde_json::from_str(
            r#"{"id": "evt1", "status": "confirmed", "summary": "Checkup"}"#,
        )
        .unwrap();
        assert_eq!(existing.id.as_str(), "evt1");
        assert!(existing.start.is_none());
        assert!(!existing.matches(&sample_event()));
    }

    #[test]
    fn test_existing_event_matches_same_instant_other_offset() {
        let existing: ExistingEvent = serde_json::from_str(
            r#"{
                "id": "evt1",
                "summary": "Checkup",
                "start": {"dateTime": "2026-02-20T11:00:00+01:00"},
                "end": {"dateTime": "2026-02-20T11:30:00+01:00"}
            }"#,
        )
        .unwrap();
        assert!(existing.matches(&sample_event()));
    }

    #[test]
    fn test_existing_all_day_event_never_matches() {
        let existing: ExistingEvent = serde_json::from_str(
            r#"{
                "id": "evt1",
                "summary": "Checkup",
                "start": {"date": "2026-02-20"},
                "end": {"date": "2026-02-21"}
            }"#,
        )
        .unwrap();
        assert!(existing.start.as_ref().unwrap().date_time.is_none());
        assert!(!existing.matches(&sample_event()));
    }

    #[test]
    fn test_existing_event_detects_change() {
        let existing: ExistingEvent = serde_json::from_str(
            r#"{
                "id": "evt1",
                "summary": "Old title",
                "description": "",
                "start": {"dateTime": "2026-02-20T10:00:00Z"},
                "end": {"dateTime": "2026-02-20T10:30:00Z"}
            }"#,
        )
        .unwrap();
        assert!(!existing.matches(&sample_event()));
    }
}
