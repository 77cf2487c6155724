//! Export fan-out
//!
//! Pushes the latest stored tariffs to every configured spreadsheet. Each
//! target is handled in turn and failures are recorded per target, so one
//! broken spreadsheet never blocks the rest.

use crate::adapters::postgresql::TariffReader;
use crate::adapters::sheets::SpreadsheetWriter;
use crate::core::export::rows::build_export_rows;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;

/// Result of one export attempt against one spreadsheet
#[derive(Debug, Clone, Serialize)]
pub struct ExportOutcome {
    pub spreadsheet_id: String,
    pub success: bool,
    pub rows_written: Option<usize>,
    pub error: Option<String>,
    pub finished_at: Option<DateTime<Utc>>,
}

impl ExportOutcome {
    fn succeeded(spreadsheet_id: String, rows_written: usize) -> Self {
        Self {
            spreadsheet_id,
            success: true,
            rows_written: Some(rows_written),
            error: None,
            finished_at: Some(Utc::now()),
        }
    }

    fn failed(spreadsheet_id: String, error: String) -> Self {
        Self {
            spreadsheet_id,
            success: false,
            rows_written: None,
            error: Some(error),
            finished_at: Some(Utc::now()),
        }
    }
}

/// Fan-out of the latest tariffs to all registered spreadsheets
pub struct ExportFanout {
    sheets: Option<Arc<dyn SpreadsheetWriter>>,
    store: Arc<dyn TariffReader>,
}

impl ExportFanout {
    /// Create a fan-out
    ///
    /// `sheets` is `None` when the Sheets client could not be initialized;
    /// export passes then complete immediately with no outcomes.
    pub fn new(sheets: Option<Arc<dyn SpreadsheetWriter>>, store: Arc<dyn TariffReader>) -> Self {
        Self { sheets, store }
    }

    /// Export the latest stored tariffs to every registered target
    ///
    /// Returns one outcome per target. Returns an empty list when the
    /// Sheets client is absent, the store holds no data yet, or the
    /// target list cannot be read.
    pub async fn export_latest(&self) -> Vec<ExportOutcome> {
        let Some(sheets) = self.sheets.as_ref() else {
            tracing::warn!("Sheets client not initialized, skipping export");
            return Vec::new();
        };

        let latest = match self.store.latest().await {
            Ok(Some(latest)) => latest,
            Ok(None) => {
                tracing::warn!("No tariffs stored yet, skipping export");
                return Vec::new();
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to load latest tariffs for export");
                return Vec::new();
            }
        };

        let targets = match self.store.list_export_targets().await {
            Ok(targets) => targets,
            Err(e) => {
                tracing::error!(error = %e, "Failed to list export targets");
                return Vec::new();
            }
        };

        if targets.is_empty() {
            tracing::info!("No export targets registered");
            return Vec::new();
        }

        // One stamp per pass so every target shows the same snapshot time.
        let last_updated = Utc::now().format("%Y-%m-%d %H:%M:%S").to_string();
        let rows = build_export_rows(&latest.warehouses, &last_updated);

        tracing::info!(
            request_date = %latest.request.request_date,
            target_count = targets.len(),
            warehouse_count = latest.warehouses.len(),
            "Starting export fan-out"
        );

        let mut outcomes = Vec::with_capacity(targets.len());
        for spreadsheet_id in targets {
            let outcome = self
                .export_to_target(sheets.as_ref(), &spreadsheet_id, &rows)
                .await;

            if outcome.success {
                tracing::info!(
                    spreadsheet_id = %spreadsheet_id,
                    rows_written = outcome.rows_written.unwrap_or(0),
                    "Exported tariffs to spreadsheet"
                );
            } else {
                tracing::error!(
                    spreadsheet_id = %spreadsheet_id,
                    error = outcome.error.as_deref().unwrap_or("unknown"),
                    "Failed to export tariffs to spreadsheet"
                );
            }

            outcomes.push(outcome);
        }

        let success_count = outcomes.iter().filter(|o| o.success).count();
        tracing::info!(
            success_count = success_count,
            failure_count = outcomes.len() - success_count,
            "Export fan-out finished"
        );

        outcomes
    }

    async fn export_to_target(
        &self,
        sheets: &dyn SpreadsheetWriter,
        spreadsheet_id: &str,
        rows: &[Vec<serde_json::Value>],
    ) -> ExportOutcome {
        match sheets.check_access(spreadsheet_id).await {
            Ok(true) => {}
            Ok(false) => {
                return ExportOutcome::failed(
                    spreadsheet_id.to_string(),
                    "Spreadsheet is not accessible to the service account".to_string(),
                );
            }
            Err(e) => {
                return ExportOutcome::failed(spreadsheet_id.to_string(), e.to_string());
            }
        }

        match sheets.export_rows(spreadsheet_id, rows).await {
            Ok(rows_written) => ExportOutcome::succeeded(spreadsheet_id.to_string(), rows_written),
            Err(e) => ExportOutcome::failed(spreadsheet_id.to_string(), e.to_string()),
        }
    }
}
