//! Sync pipeline
//!
//! One pass of the pipeline fetches tariffs for a date, persists them, and
//! fans the stored snapshot out to the export targets. Persistence and
//! export are separate phases: once data is committed, export failures do
//! not undo it.

use crate::adapters::postgresql::TariffStore;
use crate::adapters::provider::TariffProviderClient;
use crate::core::export::ExportFanout;
use crate::domain::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::Arc;

/// One scheduled unit of work
///
/// The scheduler depends on this trait rather than the concrete pipeline
/// so tick behavior can be tested with a stub pass.
#[async_trait]
pub trait SyncPass: Send + Sync {
    /// Run a full pass for a calendar date
    async fn run(&self, date: NaiveDate) -> Result<()>;
}

/// Fetch, persist, export
pub struct SyncPipeline {
    fetcher: Arc<TariffProviderClient>,
    store: Arc<TariffStore>,
    fanout: Arc<ExportFanout>,
}

impl SyncPipeline {
    /// Create a pipeline from its stages
    pub fn new(
        fetcher: Arc<TariffProviderClient>,
        store: Arc<TariffStore>,
        fanout: Arc<ExportFanout>,
    ) -> Self {
        Self {
            fetcher,
            store,
            fanout,
        }
    }
}

#[async_trait]
impl SyncPass for SyncPipeline {
    async fn run(&self, date: NaiveDate) -> Result<()> {
        let snapshot = self.fetcher.fetch_box_tariffs(date).await?;
        self.store.save(&snapshot).await?;

        // Phase two. Outcomes are logged inside the fan-out and failures
        // here never roll back the committed snapshot.
        let outcomes = self.fanout.export_latest().await;
        let failed = outcomes.iter().filter(|o| !o.success).count();
        if failed > 0 {
            tracing::warn!(
                failed_targets = failed,
                total_targets = outcomes.len(),
                "Sync pass completed with export failures"
            );
        }

        Ok(())
    }
}
