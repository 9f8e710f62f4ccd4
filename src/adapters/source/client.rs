//! HTTP client for the third-party appointments API
//!
//! One `GET {base_url}/appointments` per sync run, authenticated with HTTP
//! Basic Auth. No retries happen here; a failed fetch aborts the run.

use super::AppointmentSource;
use crate::config::{SecretString, SourceConfig};
use crate::domain::{BridgeError, Result, SourceAppointment};
use async_trait::async_trait;
use base64::{engine::general_purpose, Engine as _};
use chrono::{DateTime, Utc};
use reqwest::{Client, ClientBuilder};
use secrecy::ExposeSecret;
use std::time::Duration;

/// Longest slice of an error body kept in error messages
const MAX_ERROR_BODY: usize = 512;

/// Appointment source backed by the third-party REST API
pub struct HttpAppointmentSource {
    base_url: String,
    username: String,
    password: Option<SecretString>,
    client: Client,
}

impl HttpAppointmentSource {
    /// Create a new client from configuration
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the HTTP client cannot be built.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use calbridge::adapters::source::HttpAppointmentSource;
    /// use calbridge::config::SourceConfig;
    ///
    /// # fn example(config: &SourceConfig) -> calbridge::domain::Result<()> {
    /// let source = HttpAppointmentSource::new(config)?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(config: &SourceConfig) -> Result<Self> {
        let client = ClientBuilder::new()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| {
                BridgeError::Configuration(format!("Failed to build HTTP client: {e}"))
            })?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            username: config.username.clone(),
            password: config.password.clone(),
            client,
        })
    }

    /// Build authorization header value
    fn auth_header_value(&self) -> String {
        let password = self
            .password
            .as_ref()
            .map(|p| p.expose_secret().as_ref().to_string())
            .unwrap_or_default();
        let credentials = format!("{}:{}", self.username, password);
        let encoded = general_purpose::STANDARD.encode(credentials.as_bytes());
        format!("Basic {encoded}")
    }

    fn appointments_url(&self) -> String {
        format!("{}/appointments", self.base_url)
    }
}

/// Decode the appointments payload
///
/// The body must be a JSON array; each element must deserialize into a
/// [`SourceAppointment`]. The first bad element fails the whole payload.
pub(crate) fn parse_appointments(body: &str) -> Result<Vec<SourceAppointment>> {
    let payload: serde_json::Value = serde_json::from_str(body)
        .map_err(|e| BridgeError::MalformedResponse(format!("Response is not valid JSON: {e}")))?;

    let items = match payload {
        serde_json::Value::Array(items) => items,
        other => {
            return Err(BridgeError::MalformedResponse(format!(
                "Expected appointment list from third-party API, got {}",
                json_kind(&other)
            )))
        }
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            if !item.is_object() {
                return Err(BridgeError::MalformedResponse(format!(
                    "Appointment at index {index} is {}, expected an object",
                    json_kind(&item)
                )));
            }
            serde_json::from_value::<SourceAppointment>(item).map_err(|e| {
                BridgeError::MalformedResponse(format!("Appointment at index {index}: {e}"))
            })
        })
        .collect()
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

fn truncate(body: &str) -> &str {
    match body.char_indices().nth(MAX_ERROR_BODY) {
        Some((idx, _)) => &body[..idx],
        None => body,
    }
}

#[async_trait]
impl AppointmentSource for HttpAppointmentSource {
    async fn fetch(&self, updated_since: Option<DateTime<Utc>>) -> Result<Vec<SourceAppointment>> {
        let url = self.appointments_url();

        let mut request = self
            .client
            .get(&url)
            .header("Authorization", self.auth_header_value())
            .header("Accept", "application/json");

        if let Some(since) = updated_since {
            request = request.query(&[("updated_since", since.to_rfc3339())]);
        }

        tracing::debug!(
            url = %url,
            updated_since = ?updated_since,
            "Fetching appointments"
        );

        let resp = request
            .send()
            .await
            .map_err(|e| BridgeError::SourceUnavailable(format!("Request to {url} failed: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(BridgeError::SourceUnavailable(format!(
                "Appointment source returned HTTP {status}: {}",
                truncate(&body)
            )));
        }

        let body = resp.text().await.map_err(|e| {
            BridgeError::SourceUnavailable(format!("Failed to read response body: {e}"))
        })?;

        let appointments = parse_appointments(&body)?;

        tracing::info!(
            count = appointments.len(),
            "Fetched appointments from source"
        );

        Ok(appointments)
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }
}
