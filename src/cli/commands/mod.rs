//! Command implementations

pub mod export;
pub mod run;
pub mod status;
pub mod sync;
pub mod validate;

use crate::adapters::postgresql::{PostgresClient, TariffStore};
use crate::adapters::sheets::{SheetsClient, SpreadsheetWriter};
use crate::config::SyncConfig;
use std::sync::Arc;

/// Connect to PostgreSQL and verify the connection
pub(crate) async fn connect_store(config: &SyncConfig) -> crate::domain::Result<Arc<TariffStore>> {
    let client = PostgresClient::new(config.postgresql.clone())?;
    client.test_connection().await?;
    Ok(Arc::new(TariffStore::new(Arc::new(client))))
}

/// Initialize the Sheets client if credentials are available
///
/// A missing or invalid credential file downgrades the service to
/// store-only mode rather than failing startup.
pub(crate) fn init_sheets(config: &SyncConfig) -> Option<Arc<dyn SpreadsheetWriter>> {
    match SheetsClient::new(&config.sheets) {
        Ok(client) => Some(Arc::new(client)),
        Err(e) => {
            tracing::warn!(
                error = %e,
                "Sheets client unavailable, exports will be skipped"
            );
            None
        }
    }
}
