//! Domain models and types for calbridge.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Identifiers** ([`AppointmentId`], [`EventId`])
//! - **Models** ([`SourceAppointment`], [`CalendarEvent`], [`ExistingEvent`])
//! - **Error types** ([`BridgeError`])
//! - **Result type alias** ([`Result`])
//!
//! # Dedup marker
//!
//! A [`CalendarEvent`] can only be built through
//! [`CalendarEvent::for_appointment`], which stamps the source appointment id
//! into the event's private extended properties:
//!
//! ```rust
//! use calbridge::domain::{AppointmentId, CalendarEvent};
//! use chrono::DateTime;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let id = AppointmentId::new("apt_1")?;
//! let start = DateTime::parse_from_rfc3339("2026-02-20T10:00:00+00:00")?;
//! let end = DateTime::parse_from_rfc3339("2026-02-20T10:30:00+00:00")?;
//!
//! let event = CalendarEvent::for_appointment(&id, "Checkup", "", start, end);
//! assert_eq!(event.source_appointment_id(), "apt_1");
//! # Ok(())
//! # }
//! ```

pub mod appointment;
pub mod errors;
pub mod event;
pub mod ids;
pub mod result;

pub use appointment::SourceAppointment;
pub use errors::BridgeError;
pub use event::{CalendarEvent, EventDateTime, ExistingEvent, SOURCE_ID_PROPERTY};
pub use ids::{AppointmentId, EventId};
pub use result::Result;
