//! Reading source trait

use async_trait::async_trait;

use crate::reading::Reading;

/// One page of historical readings
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReadingPage {
    pub items: Vec<Reading>,
    pub total: u64,
}

/// Where readings come from
///
/// Every method fails with [`crate::TelemetryError::SourceUnavailable`] when the
/// source cannot be reached or returns something unparseable.
#[async_trait]
#[cfg_attr(test, mockall::automock)]
pub trait ReadingSource: Send + Sync {
    /// The most recent reading
    async fn fetch_latest(&self) -> crate::Result<Reading>;

    /// Up to `count` most recent readings, oldest first
    async fn fetch_recent(&self, count: usize) -> crate::Result<Vec<Reading>>;

    /// A page of the full history (1-based `page`)
    async fn fetch_all(&self, page: u32, limit: u32) -> crate::Result<ReadingPage>;

    /// Succeeds when the source reports itself healthy
    async fn health_check(&self) -> crate::Result<()>;
}
