//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the tariff-sync configuration file.

use crate::config::load_config;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        // load_config validates after parsing, so a successful load means
        // the file is usable as-is.
        let config = match load_config(config_path) {
            Ok(c) => {
                println!("✅ Configuration file loaded successfully");
                c
            }
            Err(e) => {
                println!("❌ Failed to load configuration file");
                println!("   Error: {e}");
                return Ok(2); // Configuration error exit code
            }
        };

        println!("✅ Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!("  Provider URL: {}", config.provider.base_url);
        println!(
            "  Provider API Key: {}",
            if config.provider.api_key.is_some() {
                "set"
            } else {
                "not set"
            }
        );
        println!("  Sync Interval: {} hour(s)", config.scheduler.interval_hours);
        println!(
            "  PostgreSQL: {}",
            config
                .postgresql
                .connection_string
                .split('@')
                .next_back()
                .unwrap_or("***")
        );
        println!("  Max Connections: {}", config.postgresql.max_connections);
        println!("  Sheets Credentials: {}", config.sheets.credentials_file);
        println!("  File Logging: {}", config.logging.file_enabled);
        println!();
        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_args_creation() {
        let args = ValidateArgs {};
        let _ = format!("{args:?}");
    }
}
