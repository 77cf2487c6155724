//! Export command implementation
//!
//! This module implements the `export` command: push the latest stored
//! tariffs to every registered spreadsheet without fetching anything.

use crate::config::load_config;
use crate::core::ExportFanout;
use clap::Args;

/// Arguments for the export command
#[derive(Args, Debug)]
pub struct ExportArgs {}

impl ExportArgs {
    /// Execute the export command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        println!("📤 Exporting latest tariffs to spreadsheets");

        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Failed to load configuration file");
                println!("   Error: {e}");
                return Ok(2); // Configuration error exit code
            }
        };

        let store = match super::connect_store(&config).await {
            Ok(s) => s,
            Err(e) => {
                println!("❌ Failed to connect to PostgreSQL");
                println!("   Error: {e}");
                return Ok(4); // Connection error exit code
            }
        };

        let sheets = super::init_sheets(&config);
        if sheets.is_none() {
            println!("❌ Google Sheets client could not be initialized");
            return Ok(2);
        }

        let fanout = ExportFanout::new(sheets, store);
        let outcomes = fanout.export_latest().await;

        if outcomes.is_empty() {
            println!("Nothing to export: no stored tariffs or no registered spreadsheets.");
            return Ok(0);
        }

        println!();
        for outcome in &outcomes {
            if outcome.success {
                println!(
                    "✅ {} ({} rows)",
                    outcome.spreadsheet_id,
                    outcome.rows_written.unwrap_or(0)
                );
            } else {
                println!(
                    "❌ {} ({})",
                    outcome.spreadsheet_id,
                    outcome.error.as_deref().unwrap_or("unknown error")
                );
            }
        }

        let failed = outcomes.iter().filter(|o| !o.success).count();
        println!();
        println!(
            "Exported to {}/{} spreadsheet(s)",
            outcomes.len() - failed,
            outcomes.len()
        );

        if failed > 0 {
            Ok(1) // Partial failure exit code
        } else {
            Ok(0)
        }
    }
}
