// tariff-sync - Warehouse Tariff Synchronization Service
// Copyright (c) 2025 tariff-sync Contributors
// Licensed under the MIT License

//! # tariff-sync - Warehouse Tariff Synchronization
//!
//! tariff-sync is a service that keeps warehouse box tariffs in sync: it
//! fetches the current tariff table from the marketplace API on a fixed
//! schedule, reconciles it into PostgreSQL, and republishes the latest
//! snapshot to a set of Google Sheets.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Fetching** box tariffs from the marketplace REST API
//! - **Persisting** each date's tariffs transactionally in PostgreSQL
//! - **Exporting** the latest stored snapshot to every registered spreadsheet
//! - **Scheduling** the whole pass on a fixed interval with an immediate first run
//!
//! ## Architecture
//!
//! tariff-sync follows a layered architecture:
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Business logic (pipeline, scheduler, export fan-out)
//! - [`adapters`] - External integrations (provider API, PostgreSQL, Google Sheets)
//! - [`domain`] - Core domain types and models
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use tariff_sync::adapters::postgresql::{PostgresClient, TariffStore};
//! use tariff_sync::adapters::provider::TariffProviderClient;
//! use tariff_sync::config::load_config;
//! use tariff_sync::core::pipeline::SyncPass;
//! use tariff_sync::core::{ExportFanout, SyncPipeline};
//! use chrono::Utc;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("tariff-sync.toml")?;
//!
//!     let client = Arc::new(PostgresClient::new(config.postgresql.clone())?);
//!     client.ensure_schema().await?;
//!
//!     let store = Arc::new(TariffStore::new(client));
//!     let fetcher = Arc::new(TariffProviderClient::new(&config.provider)?);
//!     let fanout = Arc::new(ExportFanout::new(None, store.clone()));
//!
//!     let pipeline = SyncPipeline::new(fetcher, store, fanout);
//!     pipeline.run(Utc::now().date_naive()).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! tariff-sync uses the [`domain::SyncError`] type for all errors:
//!
//! ```rust,no_run
//! use tariff_sync::domain::SyncError;
//!
//! fn example() -> Result<(), SyncError> {
//!     // Errors are automatically converted using the ? operator
//!     let config = tariff_sync::config::load_config("tariff-sync.toml")?;
//!     Ok(())
//! }
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
