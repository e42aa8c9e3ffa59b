//! Error types for the radar telemetry service

/// Errors that can occur in the radar telemetry service
#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP request failed: {0}")]
    Http(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Reading source unavailable: {0}")]
    SourceUnavailable(String),

    #[error("Dashboard error: {0}")]
    Dashboard(String),
}

impl TelemetryError {
    /// Collapse any transport or decoding failure into `SourceUnavailable`.
    ///
    /// The acquisition loop only distinguishes "a reading arrived" from
    /// "the source could not deliver one".
    pub fn into_source_unavailable(self) -> Self {
        match self {
            TelemetryError::SourceUnavailable(_) => self,
            other => TelemetryError::SourceUnavailable(other.to_string()),
        }
    }
}

/// Result type alias for radar telemetry operations
pub type Result<T> = std::result::Result<T, TelemetryError>;
