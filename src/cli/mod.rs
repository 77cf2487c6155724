//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for tariff-sync using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// tariff-sync - Warehouse tariff synchronization service
#[derive(Parser, Debug)]
#[command(name = "tariff-sync")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "tariff-sync.toml", env = "TARIFF_SYNC_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "TARIFF_SYNC_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the scheduler as a long-lived service
    Run(commands::run::RunArgs),

    /// Run a single sync pass and exit
    Sync(commands::sync::SyncArgs),

    /// Export the latest stored tariffs to all spreadsheets and exit
    Export(commands::export::ExportArgs),

    /// Show stored tariff data
    Status(commands::status::StatusArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_run() {
        let cli = Cli::parse_from(["tariff-sync", "run"]);
        assert_eq!(cli.config, "tariff-sync.toml");
        assert!(matches!(cli.command, Commands::Run(_)));
    }

    #[test]
    fn test_cli_parse_with_config() {
        let cli = Cli::parse_from(["tariff-sync", "--config", "custom.toml", "run"]);
        assert_eq!(cli.config, "custom.toml");
    }

    #[test]
    fn test_cli_parse_with_log_level() {
        let cli = Cli::parse_from(["tariff-sync", "--log-level", "debug", "sync"]);
        assert_eq!(cli.log_level, Some("debug".to_string()));
    }

    #[test]
    fn test_cli_parse_sync_with_date() {
        let cli = Cli::parse_from(["tariff-sync", "sync", "--date", "2025-07-20"]);
        match cli.command {
            Commands::Sync(args) => assert_eq!(args.date, Some("2025-07-20".to_string())),
            _ => panic!("expected sync command"),
        }
    }

    #[test]
    fn test_cli_parse_export() {
        let cli = Cli::parse_from(["tariff-sync", "export"]);
        assert!(matches!(cli.command, Commands::Export(_)));
    }

    #[test]
    fn test_cli_parse_status() {
        let cli = Cli::parse_from(["tariff-sync", "status"]);
        assert!(matches!(cli.command, Commands::Status(_)));
    }

    #[test]
    fn test_cli_parse_validate_config() {
        let cli = Cli::parse_from(["tariff-sync", "validate-config"]);
        assert!(matches!(cli.command, Commands::ValidateConfig(_)));
    }
}
