//! Tariff provider HTTP client
//!
//! Issues one outbound request per sync pass against
//! `GET {base_url}/api/v1/tariffs/box?date=YYYY-MM-DD` and normalizes the
//! payload into a [`TariffSnapshot`].

use crate::adapters::provider::models::BoxTariffsEnvelope;
use crate::config::{ProviderConfig, SecretString};
use crate::domain::{ProviderError, Result, TariffSnapshot};
use chrono::NaiveDate;
use reqwest::{Client, ClientBuilder, StatusCode};
use secrecy::ExposeSecret;
use std::time::Duration;

/// Client for the remote tariff provider
pub struct TariffProviderClient {
    base_url: String,
    client: Client,
    /// Kept wrapped; the key is only exposed while a request is built
    api_key: Option<SecretString>,
}

impl TariffProviderClient {
    /// Create a new provider client from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(config: &ProviderConfig) -> Result<Self> {
        let client = ClientBuilder::new()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| {
                crate::domain::SyncError::Configuration(format!(
                    "Failed to build HTTP client: {e}"
                ))
            })?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client,
            api_key: config.api_key.clone(),
        })
    }

    /// Fetch box tariffs for a calendar date
    ///
    /// # Errors
    ///
    /// - [`ProviderError::Validation`] when the body does not match the
    ///   expected shape
    /// - [`ProviderError::Auth`] on 401
    /// - [`ProviderError::RateLimit`] on 429
    /// - [`ProviderError::BadRequest`] on 400
    /// - [`ProviderError::Transport`] for any other HTTP or network failure
    pub async fn fetch_box_tariffs(&self, date: NaiveDate) -> Result<TariffSnapshot> {
        let url = format!("{}/api/v1/tariffs/box", self.base_url);
        let date_param = date.format("%Y-%m-%d").to_string();

        tracing::info!(date = %date_param, "Fetching box tariffs from provider");

        let mut request = self.client.get(&url).query(&[("date", date_param.as_str())]);
        if let Some(ref key) = self.api_key {
            request = request.header(
                "Authorization",
                format!("Bearer {}", key.expose_secret()),
            );
        }

        let response = request.send().await.map_err(|e| {
            ProviderError::Transport {
                status: e.status().map(|s| s.as_u16()),
                message: e.to_string(),
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = provider_message(&body);
            return Err(match status {
                StatusCode::UNAUTHORIZED => ProviderError::Auth(message),
                StatusCode::TOO_MANY_REQUESTS => ProviderError::RateLimit(message),
                StatusCode::BAD_REQUEST => ProviderError::BadRequest(message),
                _ => ProviderError::Transport {
                    status: Some(status.as_u16()),
                    message,
                },
            }
            .into());
        }

        let body = response.text().await.map_err(|e| ProviderError::Transport {
            status: None,
            message: format!("Failed to read response body: {e}"),
        })?;

        let envelope: BoxTariffsEnvelope = serde_json::from_str(&body)
            .map_err(|e| ProviderError::Validation(e.to_string()))?;

        let snapshot = envelope.into_snapshot(date);

        tracing::info!(
            date = %date_param,
            warehouse_count = snapshot.warehouses.len(),
            "Fetched tariffs from provider"
        );

        Ok(snapshot)
    }
}

/// Extract a human-readable message from an error body, falling back to the
/// raw text when it is not the usual `{"message": ...}` shape
fn provider_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(String::from))
        .unwrap_or_else(|| {
            if body.is_empty() {
                "no response body".to_string()
            } else {
                body.to_string()
            }
        })
}
