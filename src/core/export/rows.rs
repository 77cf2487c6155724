//! Export row construction
//!
//! Turns stored warehouse tariffs into the cell grid written to every
//! target spreadsheet. Rows with a coefficient come first in ascending
//! order; rows without one follow in stored (name) order.

use crate::domain::WarehouseRecord;
use serde_json::{json, Value};

/// Header row of the export tab, in column order
pub const SHEET_HEADERS: [&str; 7] = [
    "Склад",
    "Коэффициент",
    "Доставка базовая",
    "Доставка за литр",
    "Хранение базовая",
    "Хранение за литр",
    "Дата обновления",
];

fn cell(value: Option<f64>) -> Value {
    match value {
        Some(v) => json!(v),
        None => Value::Null,
    }
}

/// Build the full cell grid for an export pass, header row included
///
/// Every data row carries the same `last_updated` stamp so one pass reads
/// as a single consistent snapshot in the sheet.
pub fn build_export_rows(warehouses: &[WarehouseRecord], last_updated: &str) -> Vec<Vec<Value>> {
    let mut with_coefficient: Vec<&WarehouseRecord> = warehouses
        .iter()
        .filter(|w| w.coefficient.is_some())
        .collect();
    with_coefficient.sort_by(|a, b| {
        a.coefficient
            .partial_cmp(&b.coefficient)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let without_coefficient = warehouses.iter().filter(|w| w.coefficient.is_none());

    let mut rows = Vec::with_capacity(warehouses.len() + 1);
    rows.push(SHEET_HEADERS.iter().map(|h| json!(h)).collect());

    for warehouse in with_coefficient.into_iter().chain(without_coefficient) {
        rows.push(vec![
            json!(warehouse.warehouse_name),
            cell(warehouse.coefficient),
            cell(warehouse.delivery_base),
            cell(warehouse.delivery_per_liter),
            cell(warehouse.storage_base),
            cell(warehouse.storage_per_liter),
            json!(last_updated),
        ]);
    }

    rows
}
