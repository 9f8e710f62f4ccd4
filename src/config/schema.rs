//! Configuration schema types

use crate::config::SecretString;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Root configuration
///
/// Every section has defaults so that a deployment driven purely by
/// environment variables needs no file at all.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BridgeConfig {
    /// HTTP listener settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Third-party appointments API
    #[serde(default)]
    pub source: SourceConfig,

    /// Google Calendar target
    #[serde(default)]
    pub calendar: CalendarConfig,

    /// Sync run behavior
    #[serde(default)]
    pub sync: SyncConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl BridgeConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns a message naming the first invalid setting
    pub fn validate(&self) -> Result<(), String> {
        self.server.validate()?;
        self.source.validate()?;
        self.calendar.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// HTTP listener configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

impl ServerConfig {
    fn validate(&self) -> Result<(), String> {
        if self.host.trim().is_empty() {
            return Err("server.host cannot be empty".to_string());
        }
        if self.port == 0 {
            return Err("server.port must be > 0".to_string());
        }
        Ok(())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Third-party appointments API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Base URL; `/appointments` is appended
    #[serde(default)]
    pub base_url: String,

    #[serde(default)]
    pub username: String,

    /// Stored securely in memory and zeroized on drop
    #[serde(default)]
    pub password: Option<SecretString>,

    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl SourceConfig {
    fn validate(&self) -> Result<(), String> {
        use secrecy::ExposeSecret;

        if self.base_url.is_empty() {
            return Err("source.base_url cannot be empty (set THIRD_PARTY_BASE_URL)".to_string());
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err("source.base_url must start with http:// or https://".to_string());
        }

        if self.username.is_empty() {
            return Err("source.username cannot be empty (set THIRD_PARTY_USERNAME)".to_string());
        }

        if self
            .password
            .as_ref()
            .map(|s| s.expose_secret().is_empty())
            .unwrap_or(true)
        {
            return Err("source.password cannot be empty (set THIRD_PARTY_PASSWORD)".to_string());
        }

        if self.timeout_seconds == 0 {
            return Err("source.timeout_seconds must be > 0".to_string());
        }

        Ok(())
    }
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            username: String::new(),
            password: None,
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

/// What to do when an event for an appointment already exists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExistingEventPolicy {
    /// Always overwrite the existing event with the mapped values
    #[default]
    Update,
    /// Overwrite only when a managed field differs
    UpdateIfChanged,
    /// Leave existing events untouched
    Skip,
}

impl FromStr for ExistingEventPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "update" => Ok(Self::Update),
            "update_if_changed" => Ok(Self::UpdateIfChanged),
            "skip" => Ok(Self::Skip),
            other => Err(format!(
                "Invalid existing_event_policy '{other}'. Must be one of: update, update_if_changed, skip"
            )),
        }
    }
}

impl fmt::Display for ExistingEventPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Update => "update",
            Self::UpdateIfChanged => "update_if_changed",
            Self::Skip => "skip",
        };
        f.write_str(s)
    }
}

/// Google Calendar configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarConfig {
    #[serde(default)]
    pub calendar_id: String,

    /// Path to the service-account JSON key
    #[serde(default)]
    pub credentials_file: String,

    #[serde(default = "default_calendar_api_base_url")]
    pub api_base_url: String,

    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    #[serde(default)]
    pub existing_event_policy: ExistingEventPolicy,
}

impl CalendarConfig {
    fn validate(&self) -> Result<(), String> {
        if self.calendar_id.trim().is_empty() {
            return Err("calendar.calendar_id cannot be empty (set GOOGLE_CALENDAR_ID)".to_string());
        }

        if self.credentials_file.trim().is_empty() {
            return Err(
                "calendar.credentials_file cannot be empty (set GOOGLE_CREDENTIALS_FILE)"
                    .to_string(),
            );
        }

        if !Path::new(&self.credentials_file).is_file() {
            return Err(format!(
                "Google credentials file was not found: {}",
                self.credentials_file
            ));
        }

        if !self.api_base_url.starts_with("http://") && !self.api_base_url.starts_with("https://")
        {
            return Err("calendar.api_base_url must start with http:// or https://".to_string());
        }

        if self.timeout_seconds == 0 {
            return Err("calendar.timeout_seconds must be > 0".to_string());
        }

        Ok(())
    }
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            calendar_id: String::new(),
            credentials_file: String::new(),
            api_base_url: default_calendar_api_base_url(),
            timeout_seconds: default_timeout_seconds(),
            existing_event_policy: ExistingEventPolicy::default(),
        }
    }
}

/// Sync run configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Resolve and report without writing to the calendar
    #[serde(default)]
    pub dry_run: bool,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit console logs as JSON
    #[serde(default)]
    pub json: bool,

    /// Enable local file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log directory
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy (daily, hourly, never)
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.level.to_lowercase().as_str()) {
            return Err(format!(
                "Invalid logging.level '{}'. Must be one of: {}",
                self.level,
                valid_levels.join(", ")
            ));
        }

        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path cannot be empty when local_enabled".to_string());
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

// Default value functions
fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_calendar_api_base_url() -> String {
    "https://www.googleapis.com/calendar/v3".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_local_path() -> String {
    "./logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}
