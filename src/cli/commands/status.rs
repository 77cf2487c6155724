//! Status command implementation
//!
//! This module implements the `status` command for displaying stored
//! tariff data and registered export targets.

use crate::adapters::postgresql::TariffReader;
use crate::config::load_config;
use crate::domain::DateTariffs;
use chrono::NaiveDate;
use clap::Args;

/// Arguments for the status command
#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Show tariffs for a specific date instead of the latest
    #[arg(long)]
    pub date: Option<String>,
}

impl StatusArgs {
    /// Execute the status command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        println!("📊 Tariff Store Status");
        println!();

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

        let tariffs = match &self.date {
            Some(raw) => {
                let date = match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
                    Ok(d) => d,
                    Err(e) => {
                        println!("❌ Invalid --date value");
                        println!("   Error: {e}");
                        return Ok(2);
                    }
                };
                store.for_date(date).await
            }
            None => store.latest().await,
        };

        let tariffs = match tariffs {
            Ok(t) => t,
            Err(e) => {
                println!("❌ Failed to load tariffs");
                println!("   Error: {e}");
                return Ok(5); // Fatal error exit code
            }
        };

        match tariffs {
            Some(tariffs) => print_tariffs(&tariffs),
            None => {
                println!("No tariff data found.");
                println!("Run 'tariff-sync sync' to fetch data.");
            }
        }

        match store.list_export_targets().await {
            Ok(targets) if targets.is_empty() => {
                println!();
                println!("No export targets registered.");
            }
            Ok(targets) => {
                println!();
                println!("Export targets ({}):", targets.len());
                for target in targets {
                    println!("  {target}");
                }
            }
            Err(e) => {
                println!();
                println!("❌ Failed to list export targets");
                println!("   Error: {e}");
                return Ok(5);
            }
        }

        println!();
        Ok(0)
    }
}

fn print_tariffs(tariffs: &DateTariffs) {
    println!("Request date: {}", tariffs.request.request_date);
    println!(
        "Next boundary: {}",
        tariffs
            .request
            .next_boundary_date
            .map(|d| d.to_string())
            .unwrap_or_else(|| "-".to_string())
    );
    println!(
        "Max boundary:  {}",
        tariffs
            .request
            .max_boundary_date
            .map(|d| d.to_string())
            .unwrap_or_else(|| "-".to_string())
    );
    println!();
    println!("Warehouses ({}):", tariffs.warehouses.len());
    println!();
    println!(
        "{:<30} {:>12} {:>12} {:>12} {:>12} {:>12}",
        "Warehouse", "Coef", "Deliv base", "Deliv/liter", "Stor base", "Stor/liter"
    );
    println!("{}", "-".repeat(94));

    for warehouse in &tariffs.warehouses {
        println!(
            "{:<30} {:>12} {:>12} {:>12} {:>12} {:>12}",
            warehouse.warehouse_name,
            format_cell(warehouse.coefficient),
            format_cell(warehouse.delivery_base),
            format_cell(warehouse.delivery_per_liter),
            format_cell(warehouse.storage_base),
            format_cell(warehouse.storage_per_liter),
        );
    }
}

fn format_cell(value: Option<f64>) -> String {
    value.map(|v| format!("{v:.2}")).unwrap_or_else(|| "-".to_string())
}
