//! Sync command implementation
//!
//! This module implements the `sync` command: one fetch-save-export pass
//! for a single date, then exit.

use crate::adapters::provider::TariffProviderClient;
use crate::config::load_config;
use crate::core::pipeline::SyncPass;
use crate::core::{ExportFanout, SyncPipeline};
use chrono::{NaiveDate, Utc};
use clap::Args;
use std::sync::Arc;

/// Arguments for the sync command
#[derive(Args, Debug)]
pub struct SyncArgs {
    /// Date to sync in YYYY-MM-DD format (defaults to today, UTC)
    #[arg(long)]
    pub date: Option<String>,
}

impl SyncArgs {
    /// Execute the sync command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let date = match self.parse_date() {
            Ok(d) => d,
            Err(e) => {
                println!("❌ Invalid --date value");
                println!("   Error: {e}");
                return Ok(2);
            }
        };

        println!("🔄 Running sync pass for {date}");

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

        let fetcher = match TariffProviderClient::new(&config.provider) {
            Ok(f) => Arc::new(f),
            Err(e) => {
                println!("❌ Failed to build provider client");
                println!("   Error: {e}");
                return Ok(2);
            }
        };

        let sheets = super::init_sheets(&config);
        let fanout = Arc::new(ExportFanout::new(sheets, store.clone()));
        let pipeline = SyncPipeline::new(fetcher, store, fanout);

        match pipeline.run(date).await {
            Ok(()) => {
                println!("✅ Sync pass completed for {date}");
                Ok(0)
            }
            Err(e) => {
                println!("❌ Sync pass failed");
                println!("   Error: {e}");
                Ok(5) // Fatal error exit code
            }
        }
    }

    fn parse_date(&self) -> Result<NaiveDate, chrono::ParseError> {
        match &self.date {
            Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d"),
            None => Ok(Utc::now().date_naive()),
        }
    }
}
