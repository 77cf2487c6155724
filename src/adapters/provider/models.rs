//! Wire payload types and snapshot normalization
//!
//! The provider returns every numeric field as a string, possibly with a
//! comma decimal separator. Normalization turns those into `Option<f64>`:
//! a field that fails to parse to a finite number becomes absent, never
//! zero and never an error.

use crate::domain::{TariffSnapshot, WarehouseTariff};
use chrono::NaiveDate;
use serde::Deserialize;

/// Top-level provider payload: `{response: {data: {...}}}`
#[derive(Debug, Deserialize)]
pub struct BoxTariffsEnvelope {
    pub response: BoxTariffsResponse,
}

#[derive(Debug, Deserialize)]
pub struct BoxTariffsResponse {
    pub data: BoxTariffsData,
}

#[derive(Debug, Deserialize)]
pub struct BoxTariffsData {
    /// Start date of the next tariff regime
    #[serde(rename = "dtNextBox")]
    pub dt_next_box: Option<String>,

    /// End date of the last announced tariff regime
    #[serde(rename = "dtTillMax")]
    pub dt_till_max: Option<String>,

    #[serde(rename = "warehouseList")]
    pub warehouse_list: Vec<WarehouseEntry>,
}

/// One warehouse entry as the provider encodes it
#[derive(Debug, Deserialize)]
pub struct WarehouseEntry {
    #[serde(rename = "warehouseName")]
    pub warehouse_name: String,

    #[serde(rename = "boxDeliveryAndStorageExpr")]
    pub box_delivery_and_storage_expr: Option<String>,

    #[serde(rename = "boxDeliveryBase")]
    pub box_delivery_base: Option<String>,

    #[serde(rename = "boxDeliveryLiter")]
    pub box_delivery_liter: Option<String>,

    #[serde(rename = "boxStorageBase")]
    pub box_storage_base: Option<String>,

    #[serde(rename = "boxStorageLiter")]
    pub box_storage_liter: Option<String>,
}

impl BoxTariffsEnvelope {
    /// Normalize the validated payload into a [`TariffSnapshot`]
    pub fn into_snapshot(self, request_date: NaiveDate) -> TariffSnapshot {
        let data = self.response.data;

        let warehouses = data
            .warehouse_list
            .into_iter()
            .map(|entry| WarehouseTariff {
                name: entry.warehouse_name,
                coefficient: parse_decimal(entry.box_delivery_and_storage_expr.as_deref()),
                delivery_base: parse_decimal(entry.box_delivery_base.as_deref()),
                delivery_per_liter: parse_decimal(entry.box_delivery_liter.as_deref()),
                storage_base: parse_decimal(entry.box_storage_base.as_deref()),
                storage_per_liter: parse_decimal(entry.box_storage_liter.as_deref()),
            })
            .collect();

        TariffSnapshot {
            request_date,
            next_boundary_date: parse_boundary_date(data.dt_next_box.as_deref()),
            max_boundary_date: parse_boundary_date(data.dt_till_max.as_deref()),
            warehouses,
        }
    }
}

/// Parse a provider decimal string, tolerating a comma separator and
/// surrounding whitespace; `"12,34"` becomes `12.34`
///
/// Empty, unparsable, and non-finite values all normalize to `None`.
pub fn parse_decimal(value: Option<&str>) -> Option<f64> {
    let raw = value?;
    let cleaned: String = raw
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| if c == ',' { '.' } else { c })
        .collect();

    if cleaned.is_empty() {
        return None;
    }

    match cleaned.parse::<f64>() {
        Ok(parsed) if parsed.is_finite() => Some(parsed),
        _ => None,
    }
}

/// Parse a boundary date, accepting a plain date or an RFC 3339 prefix
///
/// Unparsable values degrade to `None` rather than failing the fetch.
pub fn parse_boundary_date(value: Option<&str>) -> Option<NaiveDate> {
    let raw = value?.trim();
    if raw.is_empty() {
        return None;
    }

    let date_part = raw.split('T').next().unwrap_or(raw);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}
