//! PostgreSQL adapter for the tariff store

pub mod client;
pub mod store;

pub use client::PostgresClient;
pub use store::{TariffReader, TariffStore};
