//! Appointment to calendar event mapping
//!
//! Pure transformation, no I/O.

use crate::domain::{BridgeError, CalendarEvent, Result, SourceAppointment};

/// Map a source appointment onto the event that mirrors it
///
/// - `title` becomes `summary`
/// - `description` is carried over, empty when absent
/// - start and end keep their original UTC offsets
/// - the appointment id is stamped as the dedup marker
///
/// # Errors
///
/// Returns [`BridgeError::InvalidAppointment`] if start or end is missing, or
/// if end precedes start. A zero-length appointment is accepted.
pub fn map_appointment(appointment: &SourceAppointment) -> Result<CalendarEvent> {
    let start = appointment.start_time.ok_or_else(|| {
        BridgeError::InvalidAppointment("start_time is missing".to_string())
    })?;
    let end = appointment
        .end_time
        .ok_or_else(|| BridgeError::InvalidAppointment("end_time is missing".to_string()))?;

    if end < start {
        return Err(BridgeError::InvalidAppointment(format!(
            "end_time {} is before start_time {}",
            end.to_rfc3339(),
            start.to_rfc3339()
        )));
    }

    Ok(CalendarEvent::for_appointment(
        &appointment.id,
        appointment.title.clone(),
        appointment.description.clone().unwrap_or_default(),
        start,
        end,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::AppointmentId;
    use chrono::{DateTime, FixedOffset};
    use test_case::test_case;

    fn ts(s: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(s).unwrap()
    }

    fn appointment(start: Option<&str>, end: Option<&str>) -> SourceAppointment {
        SourceAppointment {
            id: AppointmentId::new("apt_1").unwrap(),
            title: "Checkup".to_string(),
            description: None,
            start_time: start.map(ts),
            end_time: end.map(ts),
        }
    }

    #[test]
    fn test_maps_fields_and_marker() {
        let appt = appointment(
            Some("2026-02-20T10:00:00+00:00"),
            Some("2026-02-20T10:30:00+00:00"),
        )
        .with_description("Annual");

        let event = map_appointment(&appt).unwrap();

        assert_eq!(event.summary, "Checkup");
        assert_eq!(event.description, "Annual");
        assert_eq!(event.source_appointment_id(), appt.id.as_str());
        assert_eq!(event.start.date_time, ts("2026-02-20T10:00:00+00:00"));
    }

    #[test]
    fn test_missing_description_is_empty() {
        let appt = appointment(
            Some("2026-02-20T10:00:00+00:00"),
            Some("2026-02-20T10:30:00+00:00"),
        );
        assert_eq!(map_appointment(&appt).unwrap().description, "");
    }

    #[test]
    fn test_preserves_offset() {
        let appt = appointment(
            Some("2026-02-20T10:00:00-05:00"),
            Some("2026-02-20T11:00:00-05:00"),
        );
        let event = map_appointment(&appt).unwrap();
        let body = serde_json::to_value(&event).unwrap();
        assert_eq!(body["start"]["dateTime"], "2026-02-20T10:00:00-05:00");
        assert_eq!(body["end"]["dateTime"], "2026-02-20T11:00:00-05:00");
    }

    #[test]
    fn test_zero_length_accepted() {
        let appt = appointment(
            Some("2026-02-20T10:00:00+00:00"),
            Some("2026-02-20T10:00:00+00:00"),
        );
        assert!(map_appointment(&appt).is_ok());
    }

    #[test]
    fn test_end_before_start_across_offsets() {
        // 10:00-05:00 is 15:00Z, so an end of 14:00Z precedes it
        let appt = appointment(
            Some("2026-02-20T10:00:00-05:00"),
            Some("2026-02-20T14:00:00+00:00"),
        );
        assert!(matches!(
            map_appointment(&appt),
            Err(BridgeError::InvalidAppointment(_))
        ));
    }

    #[test_case(None, Some("2026-02-20T10:30:00+00:00") ; "missing start")]
    #[test_case(Some("2026-02-20T10:00:00+00:00"), None ; "missing end")]
    #[test_case(None, None ; "missing both")]
    #[test_case(Some("2026-02-20T10:30:00+00:00"), Some("2026-02-20T10:00:00+00:00") ; "end before start")]
    fn test_invalid_appointments(start: Option<&str>, end: Option<&str>) {
        let result = map_appointment(&appointment(start, end));
        assert!(matches!(result, Err(BridgeError::InvalidAppointment(_))));
    }
}
