//! Domain models and types for the sync service.
//!
//! This module contains the core domain models and error taxonomy:
//!
//! - **Snapshot types** ([`TariffSnapshot`], [`WarehouseTariff`]) - produced
//!   by the remote fetcher, consumed by the store writer
//! - **Persisted records** ([`TariffRequestRecord`], [`WarehouseRecord`],
//!   [`DateTariffs`]) - what the store's read contract returns
//! - **Error types** ([`SyncError`], [`ProviderError`], [`SheetsError`])
//! - **Result type alias** ([`Result`])
//!
//! Every numeric tariff field is an `Option<f64>` at this boundary, never a
//! sentinel zero: "unknown" stays distinguishable from "confirmed zero"
//! through the export sort/filter logic.

pub mod errors;
pub mod records;
pub mod result;
pub mod snapshot;

// Re-export commonly used types for convenience
pub use errors::{ProviderError, SheetsError, SyncError};
pub use records::{DateTariffs, TariffRequestRecord, WarehouseRecord};
pub use result::Result;
pub use snapshot::{TariffSnapshot, WarehouseTariff};
