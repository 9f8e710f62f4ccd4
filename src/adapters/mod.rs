//! External system integrations for calbridge.
//!
//! - [`source`] - Third-party appointments API (read only)
//! - [`google`] - Google Calendar API (lookup and write)
//!
//! # Design Pattern
//!
//! Each external system sits behind a trait ([`source::AppointmentSource`],
//! [`google::CalendarGateway`]) so the sync pipeline can be exercised with
//! in-memory implementations.
//!
//! ```rust,no_run
//! use calbridge::adapters::google::GoogleCalendarClient;
//! use calbridge::adapters::source::HttpAppointmentSource;
//! use calbridge::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config(None::<&str>)?;
//! let source = HttpAppointmentSource::new(&config.source)?;
//! let calendar = GoogleCalendarClient::from_config(&config.calendar)?;
//! # Ok(())
//! # }
//! ```

pub mod google;
pub mod source;
