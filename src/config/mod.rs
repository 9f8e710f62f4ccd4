//! Configuration management for calbridge.
//!
//! # Overview
//!
//! Deployments usually configure the bridge purely through the environment:
//!
//! ```bash
//! export THIRD_PARTY_BASE_URL="https://scheduling.example.com/api"
//! export THIRD_PARTY_USERNAME="bridge"
//! export THIRD_PARTY_PASSWORD="secret"
//! export GOOGLE_CALENDAR_ID="team@group.calendar.google.com"
//! export GOOGLE_CREDENTIALS_FILE="/etc/calbridge/service-account.json"
//! ```
//!
//! An optional TOML file can carry the same settings plus tuning knobs, with
//! `${VAR_NAME}` placeholders substituted from the environment:
//!
//! ```toml
//! [server]
//! port = 8080
//!
//! [source]
//! base_url = "https://scheduling.example.com/api"
//! username = "bridge"
//! password = "${THIRD_PARTY_PASSWORD}"
//!
//! [calendar]
//! calendar_id = "team@group.calendar.google.com"
//! credentials_file = "/etc/calbridge/service-account.json"
//! existing_event_policy = "update_if_changed"
//!
//! [logging]
//! level = "debug"
//! json = true
//! ```
//!
//! Environment variables always win over file values. See
//! [`loader::load_config`] for the full list.

pub mod loader;
pub mod schema;
pub mod secret;

pub use loader::load_config;
pub use schema::{
    BridgeConfig, CalendarConfig, ExistingEventPolicy, LoggingConfig, ServerConfig, SourceConfig,
    SyncConfig,
};
pub use secret::{secret_string, SecretString, SecretValue};
