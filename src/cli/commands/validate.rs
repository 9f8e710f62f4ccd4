//! Validate config command implementation
//!
//! Loads the configuration the same way `serve` does and also opens the
//! Google credentials, so a broken key is caught before deployment.

use crate::adapters::google::GoogleCalendarClient;
use crate::cli::{EXIT_FATAL, EXIT_OK};
use crate::config::{load_config, BridgeConfig};
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: Option<&str>) -> anyhow::Result<i32> {
        tracing::info!(config_path = ?config_path, "Validating configuration");

        match config_path {
            Some(path) => println!("Validating configuration file {path} and environment"),
            None => println!("Validating configuration from environment"),
        }
        println!();

        let config = match load_config(config_path) {
            Ok(c) => {
                println!("✅ Configuration is valid");
                c
            }
            Err(e) => {
                println!("❌ Configuration is invalid");
                println!("   Error: {e}");
                return Ok(EXIT_FATAL);
            }
        };

        if let Err(e) = GoogleCalendarClient::from_config(&config.calendar) {
            println!("❌ Google credentials could not be used");
            println!("   Error: {e}");
            return Ok(EXIT_FATAL);
        }
        println!("✅ Google credentials loaded");

        println!();
        for line in summary_lines(&config) {
            println!("{line}");
        }
        println!();

        Ok(EXIT_OK)
    }
}

/// Human-readable configuration summary; secrets are never printed
fn summary_lines(config: &BridgeConfig) -> Vec<String> {
    vec![
        "Configuration Summary:".to_string(),
        format!("  Listen: {}:{}", config.server.host, config.server.port),
        format!("  Source API: {}", config.source.base_url),
        format!("  Source User: {}", config.source.username),
        "  Source Password: ********".to_string(),
        format!("  Calendar: {}", config.calendar.calendar_id),
        format!("  Credentials File: {}", config.calendar.credentials_file),
        format!("  Calendar API: {}", config.calendar.api_base_url),
        format!(
            "  Existing Event Policy: {}",
            config.calendar.existing_event_policy
        ),
        format!("  Dry Run: {}", config.sync.dry_run),
        format!("  Log Level: {}", config.logging.level),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::secret_string;

    #[test]
    fn test_summary_redacts_password() {
        let mut config = BridgeConfig::default();
        config.source.base_url = "https://api.example.com".to_string();
        config.source.username = "bridge".to_string();
        config.source.password = Some(secret_string("hunter2".to_string()));

        let text = summary_lines(&config).join("\n");
        assert!(text.contains("https://api.example.com"));
        assert!(text.contains("bridge"));
        assert!(!text.contains("hunter2"));
        assert!(text.contains("Existing Event Policy: update"));
    }
}
