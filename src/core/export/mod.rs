//! Spreadsheet export pipeline stage

pub mod fanout;
pub mod rows;

pub use fanout::{ExportFanout, ExportOutcome};
pub use rows::{build_export_rows, SHEET_HEADERS};
