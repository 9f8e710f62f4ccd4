//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::{BridgeConfig, ExistingEventPolicy};
use super::secret::secret_string;
use crate::domain::errors::BridgeError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

/// Loads configuration from an optional TOML file plus the environment
///
/// This function:
/// 1. Reads the TOML file, if one is given
/// 2. Performs environment variable substitution (`${VAR}` syntax)
/// 3. Parses the TOML into [`BridgeConfig`] (or starts from defaults)
/// 4. Applies environment variable overrides
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns [`BridgeError::Configuration`] if the file cannot be read or
/// parsed, a referenced variable is unset, or validation fails.
///
/// # Examples
///
/// ```no_run
/// use calbridge::config::load_config;
///
/// // Environment only
/// let config = load_config(None::<&str>).expect("Failed to load config");
///
/// // File plus environment
/// let config = load_config(Some("calbridge.toml")).expect("Failed to load config");
/// ```
pub fn load_config(path: Option<impl AsRef<Path>>) -> Result<BridgeConfig> {
    let mut config = match path {
        Some(path) => load_file(path.as_ref())?,
        None => BridgeConfig::default(),
    };

    apply_env_overrides(&mut config)?;

    config.validate().map_err(|e| {
        BridgeError::Configuration(format!("Configuration validation failed: {e}"))
    })?;

    Ok(config)
}

fn load_file(path: &Path) -> Result<BridgeConfig> {
    if !path.exists() {
        return Err(BridgeError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        BridgeError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    toml::from_str(&contents)
        .map_err(|e| BridgeError::Configuration(format!("Failed to parse TOML: {e}")))
}

fn placeholder_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").expect("placeholder pattern is valid")
    })
}

/// Substitutes environment variables in the format `${VAR_NAME}`
///
/// Comment lines are left alone. All unset variables are reported together.
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = placeholder_regex();
    let mut result = String::with_capacity(input.len());
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{var_name}}}");
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(BridgeError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides
///
/// The five deployment variables (`THIRD_PARTY_*`, `GOOGLE_*`) are the primary
/// way to configure the bridge; `CALBRIDGE_*` variables tune the rest.
fn apply_env_overrides(config: &mut BridgeConfig) -> Result<()> {
    // Source API
    if let Ok(val) = std::env::var("THIRD_PARTY_BASE_URL") {
        config.source.base_url = val;
    }
    if let Ok(val) = std::env::var("THIRD_PARTY_USERNAME") {
        config.source.username = val;
    }
    if let Ok(val) = std::env::var("THIRD_PARTY_PASSWORD") {
        config.source.password = Some(secret_string(val));
    }

    // Calendar
    if let Ok(val) = std::env::var("GOOGLE_CALENDAR_ID") {
        config.calendar.calendar_id = val;
    }
    if let Ok(val) = std::env::var("GOOGLE_CREDENTIALS_FILE") {
        config.calendar.credentials_file = val;
    }
    if let Ok(val) = std::env::var("GOOGLE_CALENDAR_API_BASE_URL") {
        config.calendar.api_base_url = val;
    }
    if let Ok(val) = std::env::var("CALBRIDGE_EXISTING_EVENT_POLICY") {
        config.calendar.existing_event_policy = val
            .parse::<ExistingEventPolicy>()
            .map_err(BridgeError::Configuration)?;
    }

    // Server
    if let Ok(val) = std::env::var("CALBRIDGE_HOST") {
        config.server.host = val;
    }
    if let Ok(val) = std::env::var("CALBRIDGE_PORT") {
        config.server.port = val.parse().map_err(|_| {
            BridgeError::Configuration(format!("Invalid CALBRIDGE_PORT '{val}'"))
        })?;
    }

    // Sync
    if let Ok(val) = std::env::var("CALBRIDGE_DRY_RUN") {
        config.sync.dry_run = val.parse().unwrap_or(false);
    }

    // Logging
    if let Ok(val) = std::env::var("CALBRIDGE_LOG_LEVEL") {
        config.logging.level = val;
    }

    Ok(())
}
