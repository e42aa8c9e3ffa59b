//! Reading source backed by the radar REST API

use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::config::SourceConfig;
use crate::io::HttpClient;
use crate::reading::Reading;
use crate::source::{ReadingPage, ReadingSource};
use crate::TelemetryError;

/// Paginated history response
#[derive(Debug, Deserialize)]
struct AllResponse {
    data: Vec<Reading>,
    #[serde(default)]
    pagination: Pagination,
}

#[derive(Debug, Default, Deserialize)]
struct Pagination {
    #[serde(default)]
    total: u64,
}

/// Health endpoint response
#[derive(Debug, Deserialize)]
struct HealthResponse {
    status: String,
    #[serde(default)]
    database: Option<String>,
}

/// Client for the radar REST API
pub struct HttpReadingSource {
    base_url: String,
    http: Arc<dyn HttpClient>,
}

impl std::fmt::Debug for HttpReadingSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpReadingSource")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl HttpReadingSource {
    pub fn new(config: &SourceConfig, http: Arc<dyn HttpClient>) -> Self {
        let base_url = config.base_url.trim_end_matches('/').to_string();
        tracing::debug!("Created HttpReadingSource at {}", base_url);
        Self { base_url, http }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> crate::Result<T> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .http
            .get(&url)
            .await
            .map_err(TelemetryError::into_source_unavailable)?;

        if response.status != 200 {
            tracing::debug!("Non-200 response from {}: status={}", url, response.status);
            return Err(TelemetryError::SourceUnavailable(format!(
                "GET {} returned status {}",
                url, response.status
            )));
        }

        serde_json::from_str(&response.body).map_err(|e| {
            tracing::debug!("Failed to parse response from {}: {}", url, e);
            TelemetryError::SourceUnavailable(format!("Invalid response from {}: {}", url, e))
        })
    }
}

fn log_if_malformed(reading: &Reading) {
    if !reading.is_well_formed() {
        tracing::debug!("Source delivered out-of-domain reading {}", reading);
    }
}

#[async_trait]
impl ReadingSource for HttpReadingSource {
    async fn fetch_latest(&self) -> crate::Result<Reading> {
        let reading: Reading = self.get_json("/radar/latest").await?;
        log_if_malformed(&reading);
        Ok(reading)
    }

    async fn fetch_recent(&self, count: usize) -> crate::Result<Vec<Reading>> {
        let mut readings: Vec<Reading> = self.get_json("/radar/recent").await?;
        if readings.len() > count {
            readings.drain(..readings.len() - count);
        }
        readings.iter().for_each(log_if_malformed);
        Ok(readings)
    }

    async fn fetch_all(&self, page: u32, limit: u32) -> crate::Result<ReadingPage> {
        let path = format!("/radar/all?page={}&limit={}", page, limit);
        let response: AllResponse = self.get_json(&path).await?;
        Ok(ReadingPage {
            items: response.data,
            total: response.pagination.total,
        })
    }

    async fn health_check(&self) -> crate::Result<()> {
        let health: HealthResponse = self.get_json("/health").await?;
        if health.status != "OK" {
            return Err(TelemetryError::SourceUnavailable(format!(
                "Health status is {}",
                health.status
            )));
        }
        match health.database.as_deref() {
            None | Some("Connected") => Ok(()),
            Some(other) => Err(TelemetryError::SourceUnavailable(format!(
                "Database is {}",
                other
            ))),
        }
    }
}
