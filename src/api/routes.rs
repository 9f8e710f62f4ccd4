//! Route handlers

use super::error::ApiError;
use super::state::AppState;
use crate::core::sync::SyncResult;
use crate::domain::{BridgeError, Result};
use axum::{
    extract::{Query, State},
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Offset-less layouts, read as UTC
const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/sync", post(sync))
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct HealthResponse {
    pub status: String,
}

/// Liveness probe; touches no dependency
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

#[derive(Debug, Deserialize)]
pub struct SyncParams {
    pub updated_since: Option<String>,
}

async fn sync(
    State(state): State<AppState>,
    Query(params): Query<SyncParams>,
) -> std::result::Result<Json<SyncResult>, ApiError> {
    let updated_since = params
        .updated_since
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .map(parse_updated_since)
        .transpose()?;

    let orchestrator = state.orchestrator.clone();

    // Detached from the request so a client disconnect does not cancel the run
    let result = tokio::spawn(async move { orchestrator.run_sync(updated_since).await }).await??;

    Ok(Json(result))
}

/// Parse the `updated_since` query value
///
/// Accepts RFC 3339 with an offset, an offset-less date-time (taken as UTC),
/// or a bare date (UTC midnight).
///
/// # Errors
///
/// Returns [`BridgeError::InvalidRequest`] for anything else.
pub fn parse_updated_since(raw: &str) -> Result<DateTime<Utc>> {
    let value = raw.trim();

    parse_timestamp(value)
        // An unencoded '+' in a query string arrives as a space
        .or_else(|| parse_timestamp(&value.replace(' ', "+")))
        .ok_or_else(|| {
            BridgeError::InvalidRequest(format!(
                "updated_since must be an ISO 8601 timestamp, got '{raw}'"
            ))
        })
}

fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}
