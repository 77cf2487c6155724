//! External system adapters
//!
//! Each submodule wraps one outside dependency: the remote tariff provider,
//! PostgreSQL, and the Google Sheets API.

pub mod postgresql;
pub mod provider;
pub mod sheets;
