//! Google API payloads

use crate::domain::{BridgeError, ExistingEvent, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Default OAuth token endpoint for service accounts
pub const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

/// The fields of a service-account JSON key that token minting needs
#[derive(Clone, Deserialize)]
pub struct ServiceAccountKey {
    pub client_email: String,
    pub private_key: String,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

impl fmt::Debug for ServiceAccountKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceAccountKey")
            .field("client_email", &self.client_email)
            .field("private_key", &"[REDACTED]")
            .field("token_uri", &self.token_uri)
            .finish()
    }
}

impl ServiceAccountKey {
    /// Read a key file downloaded from the Google Cloud console
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::Configuration`] if the file is missing,
    /// unreadable, or lacks `client_email`/`private_key`.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            BridgeError::Configuration(format!(
                "Failed to read Google credentials file {}: {e}",
                path.display()
            ))
        })?;
        Self::from_json(&contents)
    }

    /// Parse a key from its JSON text
    pub fn from_json(json: &str) -> Result<Self> {
        let key: Self = serde_json::from_str(json).map_err(|e| {
            BridgeError::Configuration(format!("Invalid Google credentials file: {e}"))
        })?;

        if key.client_email.trim().is_empty() {
            return Err(BridgeError::Configuration(
                "Google credentials file has an empty client_email".to_string(),
            ));
        }
        if key.private_key.trim().is_empty() {
            return Err(BridgeError::Configuration(
                "Google credentials file has an empty private_key".to_string(),
            ));
        }

        Ok(key)
    }
}

/// JWT claims for the service-account assertion
#[derive(Debug, Serialize, Deserialize)]
pub struct AssertionClaims {
    pub iss: String,
    pub scope: String,
    pub aud: String,
    pub iat: i64,
    pub exp: i64,
}

/// Response from the OAuth token endpoint
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default = "default_expires_in")]
    pub expires_in: i64,
}

fn default_expires_in() -> i64 {
    3600
}

/// `events.list` response; only the items are read
#[derive(Debug, Deserialize)]
pub struct EventList {
    #[serde(default)]
    pub items: Vec<ExistingEvent>,
}

/// Minimal view of an inserted or updated event
#[derive(Debug, Deserialize)]
pub struct WrittenEvent {
    pub id: crate::domain::EventId,
}
