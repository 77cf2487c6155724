//! Run command implementation
//!
//! This module implements the `run` command: the long-lived service mode
//! that keeps the scheduler ticking until a shutdown signal arrives.

use crate::adapters::provider::TariffProviderClient;
use crate::config::load_config;
use crate::core::{ExportFanout, SyncPipeline, SyncScheduler};
use clap::Args;
use std::sync::Arc;
use tokio::sync::watch;

/// Arguments for the run command
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Register a spreadsheet as an export target at startup (repeatable)
    #[arg(long = "spreadsheet", value_name = "ID")]
    pub spreadsheets: Vec<String>,
}

impl RunArgs {
    /// Execute the run command
    pub async fn execute(
        &self,
        config_path: &str,
        mut shutdown_signal: watch::Receiver<bool>,
    ) -> anyhow::Result<i32> {
        println!("🚀 Starting tariff sync service");

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

        if let Err(e) = store.client().ensure_schema().await {
            println!("❌ Failed to initialize database schema");
            println!("   Error: {e}");
            return Ok(4);
        }

        for spreadsheet_id in &self.spreadsheets {
            if let Err(e) = store.seed_export_target(spreadsheet_id).await {
                println!("❌ Failed to register spreadsheet {spreadsheet_id}");
                println!("   Error: {e}");
                return Ok(4);
            }
            println!("✅ Registered export target: {spreadsheet_id}");
        }

        let fetcher = match TariffProviderClient::new(&config.provider) {
            Ok(f) => Arc::new(f),
            Err(e) => {
                println!("❌ Failed to build provider client");
                println!("   Error: {e}");
                return Ok(2);
            }
        };

        let sheets = super::init_sheets(&config);
        if sheets.is_none() {
            println!("⚠️  Google Sheets unavailable, running in store-only mode");
        }

        let fanout = Arc::new(ExportFanout::new(sheets, store.clone()));
        let pipeline = Arc::new(SyncPipeline::new(fetcher, store, fanout));
        let scheduler = SyncScheduler::new(pipeline, &config.scheduler);

        println!(
            "✅ Service started, syncing every {} hour(s)",
            config.scheduler.interval_hours
        );

        scheduler.start().await;

        // Block until the signal handler flips the shutdown flag.
        while !*shutdown_signal.borrow() {
            if shutdown_signal.changed().await.is_err() {
                break;
            }
        }

        scheduler.stop();
        println!("✅ Service stopped");
        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_args_default() {
        let args = RunArgs {
            spreadsheets: Vec::new(),
        };
        assert!(args.spreadsheets.is_empty());
    }
}
