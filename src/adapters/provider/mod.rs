//! Remote tariff provider adapter

pub mod client;
pub mod models;

pub use client::TariffProviderClient;
