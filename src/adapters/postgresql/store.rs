//! Tariff store backed by PostgreSQL
//!
//! This module persists fetched tariff snapshots and serves the read side
//! used by the export fan-out and the CLI. The write path reconciles a
//! whole calendar date in a single transaction.

use crate::adapters::postgresql::client::PostgresClient;
use crate::domain::{
    DateTariffs, Result, SyncError, TariffRequestRecord, TariffSnapshot, WarehouseRecord,
};
use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::Arc;
use tokio_postgres::types::ToSql;
use tokio_postgres::Row;

/// Read side of the tariff store
///
/// The export fan-out depends on this trait rather than the concrete store
/// so it can be tested without a database.
#[async_trait]
pub trait TariffReader: Send + Sync {
    /// Load the most recently fetched date and its warehouses
    async fn latest(&self) -> Result<Option<DateTariffs>>;

    /// List configured export spreadsheet IDs
    async fn list_export_targets(&self) -> Result<Vec<String>>;
}

/// PostgreSQL-backed tariff store
pub struct TariffStore {
    client: Arc<PostgresClient>,
}

impl TariffStore {
    /// Create a new tariff store
    pub fn new(client: Arc<PostgresClient>) -> Self {
        Self { client }
    }

    /// Get a reference to the underlying client
    pub fn client(&self) -> &Arc<PostgresClient> {
        &self.client
    }

    /// Persist a snapshot for its date, replacing any previous warehouse set
    ///
    /// Runs as a single transaction. If a request row for the date already
    /// exists its boundary dates are updated in place; otherwise a new row
    /// is inserted. The warehouse child set is always replaced wholesale,
    /// so a failure at any step leaves the previous state intact.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Store`] when any statement or the commit fails.
    pub async fn save(&self, snapshot: &TariffSnapshot) -> Result<()> {
        let mut conn = self.client.get_connection().await?;

        let tx = conn
            .transaction()
            .await
            .map_err(|e| SyncError::Store(format!("Failed to begin transaction: {e}")))?;

        let existing = tx
            .query_opt(
                "SELECT id FROM tariff_requests WHERE request_date = $1",
                &[&snapshot.request_date],
            )
            .await
            .map_err(|e| SyncError::Store(format!("Failed to look up request: {e}")))?;

        let request_id: i32 = match existing {
            Some(row) => {
                let id: i32 = row.get(0);
                tx.execute(
                    "UPDATE tariff_requests
                     SET next_boundary_date = $2, max_boundary_date = $3
                     WHERE id = $1",
                    &[
                        &id,
                        &snapshot.next_boundary_date,
                        &snapshot.max_boundary_date,
                    ],
                )
                .await
                .map_err(|e| SyncError::Store(format!("Failed to update request: {e}")))?;
                id
            }
            None => {
                let row = tx
                    .query_one(
                        "INSERT INTO tariff_requests (request_date, next_boundary_date, max_boundary_date)
                         VALUES ($1, $2, $3)
                         RETURNING id",
                        &[
                            &snapshot.request_date,
                            &snapshot.next_boundary_date,
                            &snapshot.max_boundary_date,
                        ],
                    )
                    .await
                    .map_err(|e| SyncError::Store(format!("Failed to insert request: {e}")))?;
                row.get(0)
            }
        };

        tx.execute(
            "DELETE FROM tariff_warehouses WHERE request_id = $1",
            &[&request_id],
        )
        .await
        .map_err(|e| SyncError::Store(format!("Failed to clear warehouses: {e}")))?;

        if !snapshot.warehouses.is_empty() {
            let insert_sql = warehouse_insert_statement(snapshot.warehouses.len());
            let mut params: Vec<&(dyn ToSql + Sync)> =
                Vec::with_capacity(snapshot.warehouses.len() * 7 + 1);
            params.push(&request_id);
            for warehouse in &snapshot.warehouses {
                params.push(&warehouse.name);
                params.push(&warehouse.coefficient);
                params.push(&warehouse.delivery_base);
                params.push(&warehouse.delivery_per_liter);
                params.push(&warehouse.storage_base);
                params.push(&warehouse.storage_per_liter);
            }

            tx.execute(insert_sql.as_str(), &params)
                .await
                .map_err(|e| SyncError::Store(format!("Failed to insert warehouses: {e}")))?;
        }

        tx.commit()
            .await
            .map_err(|e| SyncError::Store(format!("Failed to commit transaction: {e}")))?;

        tracing::info!(
            request_date = %snapshot.request_date,
            request_id = request_id,
            warehouse_count = snapshot.warehouses.len(),
            "Saved tariff snapshot"
        );

        Ok(())
    }

    /// Load tariffs for a specific date, if any
    pub async fn for_date(&self, date: NaiveDate) -> Result<Option<DateTariffs>> {
        let rows = self
            .client
            .query(
                "SELECT id, request_date, next_boundary_date, max_boundary_date
                 FROM tariff_requests
                 WHERE request_date = $1",
                &[&date],
            )
            .await?;

        match rows.first() {
            Some(row) => {
                let request = map_request_row(row);
                let warehouses = self.warehouses_for(request.id).await?;
                Ok(Some(DateTariffs {
                    request,
                    warehouses,
                }))
            }
            None => Ok(None),
        }
    }

    /// Load tariffs for a date range inclusive, newest first
    pub async fn for_range(&self, from: NaiveDate, to: NaiveDate) -> Result<Vec<DateTariffs>> {
        let rows = self
            .client
            .query(
                "SELECT id, request_date, next_boundary_date, max_boundary_date
                 FROM tariff_requests
                 WHERE request_date >= $1 AND request_date <= $2
                 ORDER BY request_date DESC",
                &[&from, &to],
            )
            .await?;

        let mut results = Vec::with_capacity(rows.len());
        for row in rows {
            let request = map_request_row(&row);
            let warehouses = self.warehouses_for(request.id).await?;
            results.push(DateTariffs {
                request,
                warehouses,
            });
        }

        Ok(results)
    }

    /// Whether any tariffs were stored for a date
    pub async fn has_data_for_date(&self, date: NaiveDate) -> Result<bool> {
        let rows = self
            .client
            .query(
                "SELECT EXISTS(SELECT 1 FROM tariff_requests WHERE request_date = $1)",
                &[&date],
            )
            .await?;

        Ok(rows.first().map(|row| row.get(0)).unwrap_or(false))
    }

    /// Register a spreadsheet as an export target
    ///
    /// Idempotent; inserting an already-registered ID is a no-op.
    pub async fn seed_export_target(&self, spreadsheet_id: &str) -> Result<()> {
        self.client
            .execute(
                "INSERT INTO spreadsheets (spreadsheet_id)
                 VALUES ($1)
                 ON CONFLICT (spreadsheet_id) DO NOTHING",
                &[&spreadsheet_id],
            )
            .await?;
        Ok(())
    }

    async fn warehouses_for(&self, request_id: i32) -> Result<Vec<WarehouseRecord>> {
        let rows = self
            .client
            .query(
                "SELECT id, request_id, warehouse_name, coefficient,
                        delivery_base, delivery_per_liter, storage_base, storage_per_liter
                 FROM tariff_warehouses
                 WHERE request_id = $1
                 ORDER BY warehouse_name ASC",
                &[&request_id],
            )
            .await?;

        Ok(rows.iter().map(map_warehouse_row).collect())
    }
}

#[async_trait]
impl TariffReader for TariffStore {
    async fn latest(&self) -> Result<Option<DateTariffs>> {
        let rows = self
            .client
            .query(
                "SELECT id, request_date, next_boundary_date, max_boundary_date
                 FROM tariff_requests
                 ORDER BY request_date DESC
                 LIMIT 1",
                &[],
            )
            .await?;

        match rows.first() {
            Some(row) => {
                let request = map_request_row(row);
                let warehouses = self.warehouses_for(request.id).await?;
                Ok(Some(DateTariffs {
                    request,
                    warehouses,
                }))
            }
            None => Ok(None),
        }
    }

    async fn list_export_targets(&self) -> Result<Vec<String>> {
        let rows = self
            .client
            .query(
                "SELECT spreadsheet_id FROM spreadsheets ORDER BY spreadsheet_id",
                &[],
            )
            .await?;

        Ok(rows.iter().map(|row| row.get(0)).collect())
    }
}

fn map_request_row(row: &Row) -> TariffRequestRecord {
    TariffRequestRecord {
        id: row.get("id"),
        request_date: row.get("request_date"),
        next_boundary_date: row.get("next_boundary_date"),
        max_boundary_date: row.get("max_boundary_date"),
    }
}

fn map_warehouse_row(row: &Row) -> WarehouseRecord {
    WarehouseRecord {
        id: row.get("id"),
        request_id: row.get("request_id"),
        warehouse_name: row.get("warehouse_name"),
        coefficient: row.get("coefficient"),
        delivery_base: row.get("delivery_base"),
        delivery_per_liter: row.get("delivery_per_liter"),
        storage_base: row.get("storage_base"),
        storage_per_liter: row.get("storage_per_liter"),
    }
}

/// Build a multi-row insert statement for warehouse tariffs
///
/// `$1` is the shared request ID; each row then consumes six placeholders.
fn warehouse_insert_statement(row_count: usize) -> String {
    let mut sql = String::from(
        "INSERT INTO tariff_warehouses (request_id, warehouse_name, coefficient, \
         delivery_base, delivery_per_liter, storage_base, storage_per_liter) VALUES ",
    );

    for row in 0..row_count {
        if row > 0 {
            sql.push_str(", ");
        }
        let base = row * 6;
        sql.push_str(&format!(
            "($1, ${}, ${}, ${}, ${}, ${}, ${})",
            base + 2,
            base + 3,
            base + 4,
            base + 5,
            base + 6,
            base + 7
        ));
    }

    sql
}
