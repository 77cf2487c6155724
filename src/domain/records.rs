//! Persisted record types
//!
//! These mirror the `tariff_requests` and `tariff_warehouses` tables.
//! A request row is created on first sync for a date and only its boundary
//! dates are updated afterwards; warehouse rows are replaced wholesale on
//! every reconciliation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One persisted row per request date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TariffRequestRecord {
    pub id: i32,
    pub request_date: NaiveDate,
    pub next_boundary_date: Option<NaiveDate>,
    pub max_boundary_date: Option<NaiveDate>,
}

/// One persisted warehouse row, owned by exactly one request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WarehouseRecord {
    pub id: i32,
    pub request_id: i32,
    pub warehouse_name: String,
    pub coefficient: Option<f64>,
    pub delivery_base: Option<f64>,
    pub delivery_per_liter: Option<f64>,
    pub storage_base: Option<f64>,
    pub storage_per_liter: Option<f64>,
}

/// A request row together with its warehouse rows (name ascending)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DateTariffs {
    pub request: TariffRequestRecord,
    pub warehouses: Vec<WarehouseRecord>,
}
