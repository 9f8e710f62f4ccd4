//! Service-account authentication for the Calendar API
//!
//! A signed RS256 assertion is exchanged at the key's `token_uri` for a
//! bearer token, which is cached until shortly before it expires.

use super::models::{AssertionClaims, ServiceAccountKey, TokenResponse};
use crate::domain::{BridgeError, Result};
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use reqwest::Client;
use tokio::sync::Mutex;

/// OAuth scope granting read/write access to calendars
pub const CALENDAR_SCOPE: &str = "https://www.googleapis.com/auth/calendar";

const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const ASSERTION_LIFETIME_SECS: i64 = 3600;
const REFRESH_MARGIN_SECS: i64 = 60;

/// Supplies bearer tokens for Calendar API requests
#[async_trait]
pub trait AccessTokenProvider: Send + Sync {
    async fn access_token(&self) -> Result<String>;
}

/// A fixed bearer token, for emulators and tests
pub struct StaticTokenProvider(String);

impl StaticTokenProvider {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }
}

#[async_trait]
impl AccessTokenProvider for StaticTokenProvider {
    async fn access_token(&self) -> Result<String> {
        Ok(self.0.clone())
    }
}

struct CachedToken {
    value: String,
    expires_at: DateTime<Utc>,
}

impl CachedToken {
    fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        now + Duration::seconds(REFRESH_MARGIN_SECS) < self.expires_at
    }
}

/// Mints and caches tokens from a service-account key
pub struct ServiceAccountAuth {
    client_email: String,
    token_uri: String,
    encoding_key: EncodingKey,
    client: Client,
    cached: Mutex<Option<CachedToken>>,
}

impl ServiceAccountAuth {
    /// Prepare token minting for a key
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::Authentication`] if the private key is not a
    /// usable RSA PEM.
    pub fn new(key: &ServiceAccountKey, client: Client) -> Result<Self> {
        let encoding_key = EncodingKey::from_rsa_pem(key.private_key.as_bytes()).map_err(|e| {
            BridgeError::Authentication(format!(
                "Service account private key for {} is not a valid RSA PEM: {e}",
                key.client_email
            ))
        })?;

        Ok(Self {
            client_email: key.client_email.clone(),
            token_uri: key.token_uri.clone(),
            encoding_key,
            client,
            cached: Mutex::new(None),
        })
    }

    /// Build the signed assertion for the given issue time
    fn assertion(&self, issued_at: DateTime<Utc>) -> Result<String> {
        let iat = issued_at.timestamp();
        let claims = AssertionClaims {
            iss: self.client_email.clone(),
            scope: CALENDAR_SCOPE.to_string(),
            aud: self.token_uri.clone(),
            iat,
            exp: iat + ASSERTION_LIFETIME_SECS,
        };

        encode(&Header::new(Algorithm::RS256), &claims, &self.encoding_key)
            .map_err(|e| BridgeError::Authentication(format!("Failed to sign assertion: {e}")))
    }

    async fn exchange(&self, now: DateTime<Utc>) -> Result<CachedToken> {
        let assertion = self.assertion(now)?;

        tracing::debug!(token_uri = %self.token_uri, "Requesting Google access token");

        let resp = self
            .client
            .post(&self.token_uri)
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
            .send()
            .await
            .map_err(|e| {
                BridgeError::CalendarUnavailable(format!("Token request failed: {e}"))
            })?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(BridgeError::CalendarUnavailable(format!(
                "Token endpoint returned HTTP {status}: {body}"
            )));
        }

        let token: TokenResponse = resp.json().await.map_err(|e| {
            BridgeError::CalendarUnavailable(format!("Failed to parse token response: {e}"))
        })?;

        Ok(CachedToken {
            value: token.access_token,
            expires_at: now + Duration::seconds(token.expires_in),
        })
    }
}

#[async_trait]
impl AccessTokenProvider for ServiceAccountAuth {
    async fn access_token(&self) -> Result<String> {
        // Held across the exchange so concurrent callers mint one token
        let mut cached = self.cached.lock().await;
        let now = Utc::now();

        if let Some(token) = cached.as_ref() {
            if token.is_fresh(now) {
                return Ok(token.value.clone());
            }
        }

        let token = self.exchange(now).await?;
        let value = token.value.clone();
        *cached = Some(token);
        Ok(value)
    }
}
