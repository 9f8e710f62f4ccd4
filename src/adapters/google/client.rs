//! Google Calendar v3 REST client

use super::auth::{AccessTokenProvider, ServiceAccountAuth};
use super::models::{EventList, ServiceAccountKey, WrittenEvent};
use super::CalendarGateway;
use crate::config::CalendarConfig;
use crate::domain::{
    AppointmentId, BridgeError, CalendarEvent, EventId, ExistingEvent, Result, SOURCE_ID_PROPERTY,
};
use async_trait::async_trait;
use reqwest::{Client, ClientBuilder, RequestBuilder, Response};
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Page size for the dedup lookup; more than one hit is already an anomaly
const LOOKUP_MAX_RESULTS: &str = "10";

/// Calendar API client bound to one calendar
pub struct GoogleCalendarClient {
    api_base_url: Url,
    calendar_id: String,
    client: Client,
    auth: Arc<dyn AccessTokenProvider>,
}

impl GoogleCalendarClient {
    /// Build a client authenticated with the configured service-account key
    ///
    /// The key is read and parsed here so that a bad credentials file fails
    /// at startup rather than on the first sync.
    ///
    /// # Errors
    ///
    /// - [`BridgeError::Configuration`] if the key file or base URL is unusable
    /// - [`BridgeError::Authentication`] if the private key cannot sign
    pub fn from_config(config: &CalendarConfig) -> Result<Self> {
        let client = build_http_client(config.timeout_seconds)?;
        let key = ServiceAccountKey::from_file(&config.credentials_file)?;
        let auth = ServiceAccountAuth::new(&key, client.clone())?;

        tracing::debug!(
            client_email = %key.client_email,
            calendar_id = %config.calendar_id,
            "Loaded Google service account"
        );

        Self::with_parts(config, client, Arc::new(auth))
    }

    /// Build a client that takes bearer tokens from `auth`
    pub fn with_token_provider(
        config: &CalendarConfig,
        auth: Arc<dyn AccessTokenProvider>,
    ) -> Result<Self> {
        let client = build_http_client(config.timeout_seconds)?;
        Self::with_parts(config, client, auth)
    }

    fn with_parts(
        config: &CalendarConfig,
        client: Client,
        auth: Arc<dyn AccessTokenProvider>,
    ) -> Result<Self> {
        let api_base_url = Url::parse(&config.api_base_url).map_err(|e| {
            BridgeError::Configuration(format!(
                "Invalid calendar API base URL '{}': {e}",
                config.api_base_url
            ))
        })?;

        if api_base_url.cannot_be_a_base() {
            return Err(BridgeError::Configuration(format!(
                "Calendar API base URL '{}' cannot carry a path",
                config.api_base_url
            )));
        }

        Ok(Self {
            api_base_url,
            calendar_id: config.calendar_id.clone(),
            client,
            auth,
        })
    }

    /// `{base}/calendars/{calendarId}/events[/{eventId}]`, segments encoded
    fn events_url(&self, event_id: Option<&EventId>) -> Result<Url> {
        let mut url = self.api_base_url.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|_| {
                BridgeError::Configuration("Calendar API base URL cannot carry a path".to_string())
            })?;
            segments
                .pop_if_empty()
                .push("calendars")
                .push(&self.calendar_id)
                .push("events");
            if let Some(id) = event_id {
                segments.push(id.as_str());
            }
        }
        Ok(url)
    }

    fn lookup_url(&self, source_id: &AppointmentId) -> Result<Url> {
        let mut url = self.events_url(None)?;
        url.query_pairs_mut()
            .append_pair(
                "privateExtendedProperty",
                &format!("{SOURCE_ID_PROPERTY}={source_id}"),
            )
            .append_pair("maxResults", LOOKUP_MAX_RESULTS);
        Ok(url)
    }

    /// Attach the bearer token, send, and reject non-2xx responses
    async fn send(&self, request: RequestBuilder, action: &str) -> Result<Response> {
        let token = self.auth.access_token().await?;

        let resp = request
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| BridgeError::CalendarUnavailable(format!("{action} failed: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(BridgeError::CalendarUnavailable(format!(
                "{action} returned HTTP {status}: {body}"
            )));
        }

        Ok(resp)
    }

    async fn read_written(resp: Response, action: &str) -> Result<EventId> {
        let written: WrittenEvent = resp.json().await.map_err(|e| {
            BridgeError::CalendarUnavailable(format!("Failed to parse {action} response: {e}"))
        })?;
        Ok(written.id)
    }
}

fn build_http_client(timeout_seconds: u64) -> Result<Client> {
    ClientBuilder::new()
        .timeout(Duration::from_secs(timeout_seconds))
        .build()
        .map_err(|e| BridgeError::Configuration(format!("Failed to build HTTP client: {e}")))
}

#[async_trait]
impl CalendarGateway for GoogleCalendarClient {
    async fn find_by_source_id(&self, source_id: &AppointmentId) -> Result<Vec<ExistingEvent>> {
        let url = self.lookup_url(source_id)?;
        let resp = self.send(self.client.get(url), "Event lookup").await?;

        let list: EventList = resp.json().await.map_err(|e| {
            BridgeError::CalendarUnavailable(format!("Failed to parse event list: {e}"))
        })?;

        Ok(list.items)
    }

    async fn insert_event(&self, event: &CalendarEvent) -> Result<EventId> {
        let url = self.events_url(None)?;
        let resp = self
            .send(self.client.post(url).json(event), "Event insert")
            .await?;
        Self::read_written(resp, "insert").await
    }

    async fn update_event(&self, event_id: &EventId, event: &CalendarEvent) -> Result<EventId> {
        let url = self.events_url(Some(event_id))?;
        let resp = self
            .send(self.client.put(url).json(event), "Event update")
            .await?;
        Self::read_written(resp, "update").await
    }

    fn calendar_id(&self) -> &str {
        &self.calendar_id
    }
}
