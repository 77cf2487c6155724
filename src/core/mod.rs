//! Core pipeline logic
//!
//! The pipeline and scheduler orchestrate the adapters: fetch from the
//! provider, persist to PostgreSQL, fan out to Google Sheets.

pub mod export;
pub mod pipeline;
pub mod scheduler;

pub use export::{ExportFanout, ExportOutcome};
pub use pipeline::{SyncPass, SyncPipeline};
pub use scheduler::{SchedulerStatus, SyncScheduler};
