//! Domain error types
//!
//! This module defines the error hierarchy for calbridge. Errors are split by
//! where they stop the pipeline: source errors abort a sync run, record errors
//! are counted against a single appointment, request errors are rejected before
//! any work starts. No variant exposes third-party client types.

use thiserror::Error;

/// Main calbridge error type
#[derive(Debug, Error)]
pub enum BridgeError {
    /// The third-party appointments API could not be reached or answered non-2xx
    #[error("Appointment source unavailable: {0}")]
    SourceUnavailable(String),

    /// The third-party appointments API answered with an unexpected payload
    #[error("Malformed response from appointment source: {0}")]
    MalformedResponse(String),

    /// A single fetched appointment cannot be turned into a calendar event
    #[error("Invalid appointment: {0}")]
    InvalidAppointment(String),

    /// The Google Calendar API failed on lookup or write
    #[error("Calendar unavailable: {0}")]
    CalendarUnavailable(String),

    /// A request parameter on the HTTP surface could not be parsed
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Service-account credentials could not be used
    #[error("Authentication error: {0}")]
    Authentication(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),
}

impl BridgeError {
    /// Whether this error aborts a whole sync run rather than a single record
    pub fn is_fetch_abort(&self) -> bool {
        matches!(
            self,
            BridgeError::SourceUnavailable(_) | BridgeError::MalformedResponse(_)
        )
    }
}

impl From<std::io::Error> for BridgeError {
    fn from(err: std::io::Error) -> Self {
        BridgeError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for BridgeError {
    fn from(err: serde_json::Error) -> Self {
        BridgeError::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for BridgeError {
    fn from(err: toml::de::Error) -> Self {
        BridgeError::Configuration(format!("TOML parse error: {err}"))
    }
}
