//! Domain error types
//!
//! This module defines the error hierarchy for the sync service.
//! All errors are domain-specific and don't expose third-party types.

use thiserror::Error;

/// Main error type for the sync service
///
/// This is the primary error type used throughout the application.
/// It wraps stage-specific error types and provides context for error handling.
#[derive(Debug, Error)]
pub enum SyncError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Tariff provider errors (fetch stage)
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Store errors (write stage, always a transactional abort)
    #[error("Store error: {0}")]
    Store(String),

    /// Google Sheets errors (export stage)
    #[error("Sheets error: {0}")]
    Sheets(#[from] SheetsError),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

/// Tariff-provider-specific errors
///
/// Errors that occur when fetching tariffs from the remote provider.
/// These errors don't expose the underlying HTTP client types.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Response does not conform to the expected payload shape
    #[error("Invalid provider response: {0}")]
    Validation(String),

    /// Provider rejected credentials (401)
    #[error("Provider rejected API key: {0}")]
    Auth(String),

    /// Provider signalled throttling (429)
    #[error("Provider rate limit exceeded: {0}")]
    RateLimit(String),

    /// Provider rejected the date or parameters (400)
    #[error("Bad request to provider: {0}")]
    BadRequest(String),

    /// Any other network/HTTP failure
    #[error("Provider transport error{}: {message}", status.map(|s| format!(" ({s})")).unwrap_or_default())]
    Transport {
        status: Option<u16>,
        message: String,
    },
}

/// Google-Sheets-specific errors
///
/// Errors that occur when talking to the Sheets REST API. Per-target
/// failures are caught inside the export fan-out and never propagate
/// past it.
#[derive(Debug, Error)]
pub enum SheetsError {
    /// Sheets client was never initialized (missing/invalid credentials)
    #[error("Sheets client not initialized: {0}")]
    NotInitialized(String),

    /// Service-account credential file could not be loaded or parsed
    #[error("Invalid service-account credentials: {0}")]
    Credentials(String),

    /// Access token could not be acquired
    #[error("Failed to acquire access token: {0}")]
    Token(String),

    /// Spreadsheet exists but is not accessible to the service account
    #[error("No access to spreadsheet {0}")]
    AccessDenied(String),

    /// Sheets API returned a non-success status
    #[error("Sheets API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Network-level failure talking to the Sheets API
    #[error("Sheets connection error: {0}")]
    Connection(String),
}

// Conversion from std::io::Error
impl From<std::io::Error> for SyncError {
    fn from(err: std::io::Error) -> Self {
        SyncError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for SyncError {
    fn from(err: serde_json::Error) -> Self {
        SyncError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for SyncError {
    fn from(err: toml::de::Error) -> Self {
        SyncError::Configuration(format!("TOML parse error: {err}"))
    }
}
