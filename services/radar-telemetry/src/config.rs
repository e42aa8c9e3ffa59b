//! Configuration types for the radar telemetry service

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub acquisition: AcquisitionConfig,
    #[serde(default)]
    pub change_detection: ChangeDetectionConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub dashboard: DashboardConfig,
}

/// Where readings come from
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_recent_count")]
    pub recent_count: usize,
    #[serde(default = "default_history_page_size")]
    pub history_page_size: u32,
    #[serde(default = "default_history_max_pages")]
    pub history_max_pages: u32,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            recent_count: default_recent_count(),
            history_page_size: default_history_page_size(),
            history_max_pages: default_history_max_pages(),
            request_timeout_seconds: default_request_timeout(),
        }
    }
}

impl SourceConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }
}

/// Timer settings for the acquisition loop
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AcquisitionConfig {
    #[serde(default = "default_fetch_interval")]
    pub fetch_interval_seconds: u64,
    #[serde(default = "default_health_check_interval")]
    pub health_check_interval_seconds: u64,
}

impl Default for AcquisitionConfig {
    fn default() -> Self {
        Self {
            fetch_interval_seconds: default_fetch_interval(),
            health_check_interval_seconds: default_health_check_interval(),
        }
    }
}

impl AcquisitionConfig {
    pub fn fetch_interval(&self) -> Duration {
        Duration::from_secs(self.fetch_interval_seconds)
    }

    pub fn health_check_interval(&self) -> Duration {
        Duration::from_secs(self.health_check_interval_seconds)
    }
}

/// Thresholds that decide whether a reading counts as new
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeDetectionConfig {
    #[serde(default = "default_distance_epsilon")]
    pub distance_epsilon: f64,
    #[serde(default = "default_angle_epsilon")]
    pub angle_epsilon_degrees: f64,
    #[serde(default = "default_stale_after")]
    pub stale_after_seconds: f64,
}

impl Default for ChangeDetectionConfig {
    fn default() -> Self {
        Self {
            distance_epsilon: default_distance_epsilon(),
            angle_epsilon_degrees: default_angle_epsilon(),
            stale_after_seconds: default_stale_after(),
        }
    }
}

/// Display projection settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_distance_scale")]
    pub distance_scale: f64,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            distance_scale: default_distance_scale(),
        }
    }
}

/// Dashboard configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_dashboard_port")]
    pub port: u16,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            port: default_dashboard_port(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:5000/api".to_string()
}

fn default_recent_count() -> usize {
    5
}

fn default_history_page_size() -> u32 {
    100
}

fn default_history_max_pages() -> u32 {
    50
}

fn default_request_timeout() -> u64 {
    5
}

fn default_fetch_interval() -> u64 {
    10
}

fn default_health_check_interval() -> u64 {
    30
}

fn default_distance_epsilon() -> f64 {
    0.1
}

fn default_angle_epsilon() -> f64 {
    1.0
}

fn default_stale_after() -> f64 {
    30.0
}

fn default_distance_scale() -> f64 {
    crate::mapper::DEFAULT_DISTANCE_SCALE
}

fn default_true() -> bool {
    true
}

fn default_dashboard_port() -> u16 {
    11120
}

/// Load configuration from a JSON file
pub fn load_config(path: &Path) -> crate::Result<Config> {
    tracing::debug!("Reading config file {:?}", path);
    let content = std::fs::read_to_string(path)?;
    let config: Config = serde_json::from_str(&content)?;
    config.validate()?;
    Ok(config)
}

impl Config {
    /// Reject settings the acquisition loop cannot run with
    pub fn validate(&self) -> crate::Result<()> {
        if self.acquisition.fetch_interval_seconds == 0 {
            return Err(crate::TelemetryError::Config(
                "fetch_interval_seconds must be greater than zero".to_string(),
            ));
        }
        if self.acquisition.health_check_interval_seconds == 0 {
            return Err(crate::TelemetryError::Config(
                "health_check_interval_seconds must be greater than zero".to_string(),
            ));
        }
        if self.source.history_page_size == 0 {
            return Err(crate::TelemetryError::Config(
                "history_page_size must be greater than zero".to_string(),
            ));
        }
        if self.source.history_max_pages == 0 {
            return Err(crate::TelemetryError::Config(
                "history_max_pages must be greater than zero".to_string(),
            ));
        }
        if self.source.request_timeout_seconds == 0 {
            return Err(crate::TelemetryError::Config(
                "request_timeout_seconds must be greater than zero".to_string(),
            ));
        }
        if !(self.display.distance_scale.is_finite() && self.display.distance_scale > 0.0) {
            return Err(crate::TelemetryError::Config(format!(
                "distance_scale must be a positive number, got {}",
                self.display.distance_scale
            )));
        }
        Ok(())
    }
}
