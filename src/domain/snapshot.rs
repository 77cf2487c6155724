//! In-flight tariff snapshot types
//!
//! A [`TariffSnapshot`] is the unit produced by the remote fetcher and
//! consumed by the store writer. It is never persisted as-is; the store
//! reconciles it into request/warehouse rows.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One fetch's worth of tariff data for a single calendar date
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TariffSnapshot {
    /// The calendar date this snapshot represents (the business key)
    pub request_date: NaiveDate,

    /// Start date of the next pricing regime, when announced
    pub next_boundary_date: Option<NaiveDate>,

    /// End date of the currently announced pricing regime
    pub max_boundary_date: Option<NaiveDate>,

    /// Per-warehouse tariffs, in provider order
    pub warehouses: Vec<WarehouseTariff>,
}

/// Tariffs for a single warehouse
///
/// Every numeric field is optional: the provider omits fields freely, and
/// "unknown" must stay distinguishable from "confirmed zero" through the
/// export sort/filter logic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WarehouseTariff {
    /// Warehouse display name
    pub name: String,

    /// Delivery-and-storage multiplier the export is sorted by
    pub coefficient: Option<f64>,

    /// Base delivery price
    pub delivery_base: Option<f64>,

    /// Delivery price per liter
    pub delivery_per_liter: Option<f64>,

    /// Base storage price
    pub storage_base: Option<f64>,

    /// Storage price per liter
    pub storage_per_liter: Option<f64>,
}

impl WarehouseTariff {
    /// Create a tariff entry with only a name, all numeric fields absent
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            coefficient: None,
            delivery_base: None,
            delivery_per_liter: None,
            storage_base: None,
            storage_per_liter: None,
        }
    }
}
