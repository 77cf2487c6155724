//! Google Sheets adapter for the export fan-out

pub mod auth;
pub mod client;

pub use client::{SheetsClient, SpreadsheetWriter, SHEET_NAME};
