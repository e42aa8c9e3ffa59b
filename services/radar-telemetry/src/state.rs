//! Telemetry state and the step functions that advance it

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::change::ChangeDetector;
use crate::config::ChangeDetectionConfig;
use crate::mapper::{CoordinateMapper, Position};
use crate::reading::{ConnectionState, Reading};
use crate::stats::{RunningStats, StatisticsAggregator};
use crate::synth::ReadingSynthesizer;
use crate::threat::{classify, ThreatAssessment};

/// Consecutive failures between repeated warnings
const FAILURE_WARN_EVERY: u32 = 5;

/// Where the acquisition loop is in its life cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AcquisitionPhase {
    #[default]
    Initializing,
    Live,
    Degraded,
}

/// Everything one data fetch produced
#[derive(Debug)]
pub struct FetchOutcome {
    /// Issue order of the fetch; larger is newer
    pub seq: u64,
    pub latest: crate::Result<Reading>,
    /// Replacement trail window, `None` when it could not be fetched
    pub recent: Option<Vec<Reading>>,
    /// Distances of the full history, empty when unavailable
    pub history: Vec<f64>,
}

/// What [`Telemetry::apply_fetch`] did with an outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchDisposition {
    /// Older than an outcome already applied; ignored
    Stale,
    /// Displayed and counted in statistics
    Accepted,
    /// Displayed but a repeat of the last accepted reading
    Repeated,
}

/// Live telemetry, written only by the acquisition loop
#[derive(Debug)]
pub struct Telemetry {
    phase: AcquisitionPhase,
    connection: ConnectionState,
    current: Option<Reading>,
    simulated: bool,
    recent: Vec<Reading>,
    detector: ChangeDetector,
    aggregator: StatisticsAggregator,
    applied_seq: u64,
    consecutive_failures: u32,
    last_error: Option<String>,
    last_fetch_epoch_ms: u64,
}

impl Default for Telemetry {
    fn default() -> Self {
        Self::new(ChangeDetectionConfig::default())
    }
}

impl Telemetry {
    pub fn new(change_detection: ChangeDetectionConfig) -> Self {
        Self {
            phase: AcquisitionPhase::Initializing,
            connection: ConnectionState::Disconnected,
            current: None,
            simulated: false,
            recent: Vec::new(),
            detector: ChangeDetector::new(change_detection),
            aggregator: StatisticsAggregator::new(),
            applied_seq: 0,
            consecutive_failures: 0,
            last_error: None,
            last_fetch_epoch_ms: 0,
        }
    }

    pub fn phase(&self) -> AcquisitionPhase {
        self.phase
    }

    pub fn connection(&self) -> ConnectionState {
        self.connection
    }

    pub fn current(&self) -> Option<&Reading> {
        self.current.as_ref()
    }

    pub fn is_simulated(&self) -> bool {
        self.simulated
    }

    pub fn recent(&self) -> &[Reading] {
        &self.recent
    }

    pub fn stats(&self) -> &RunningStats {
        self.aggregator.stats()
    }

    pub fn last_accepted(&self) -> Option<&Reading> {
        self.detector.last_accepted()
    }

    pub fn consecutive_failures(&self) -> u32 {
        self.consecutive_failures
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Apply the result of a data fetch at wall-clock time `now` (unix seconds).
    ///
    /// A failed fetch degrades to a reading from `synthesizer`, which then
    /// flows through change detection and statistics like a real one.
    pub fn apply_fetch(
        &mut self,
        outcome: FetchOutcome,
        synthesizer: &mut dyn ReadingSynthesizer,
        now: f64,
    ) -> FetchDisposition {
        if outcome.seq <= self.applied_seq {
            tracing::debug!(
                "Discarding fetch #{} (already applied #{})",
                outcome.seq,
                self.applied_seq
            );
            return FetchDisposition::Stale;
        }
        self.applied_seq = outcome.seq;
        self.last_fetch_epoch_ms = (now * 1000.0) as u64;

        let reading = match outcome.latest {
            Ok(reading) => {
                if self.phase != AcquisitionPhase::Live {
                    tracing::info!("Reading source live ({:?} -> Live)", self.phase);
                }
                self.phase = AcquisitionPhase::Live;
                self.connection = ConnectionState::Connected;
                self.simulated = false;
                self.consecutive_failures = 0;
                self.last_error = None;
                if let Some(recent) = outcome.recent {
                    self.recent = recent;
                }
                reading
            }
            Err(e) => {
                self.consecutive_failures += 1;
                if self.phase != AcquisitionPhase::Degraded {
                    tracing::warn!(
                        "Reading source unavailable, switching to simulated data: {}",
                        e
                    );
                } else if self.consecutive_failures % FAILURE_WARN_EVERY == 0 {
                    tracing::warn!(
                        "Reading source has failed {} consecutive fetches: {}",
                        self.consecutive_failures,
                        e
                    );
                }
                self.phase = AcquisitionPhase::Degraded;
                self.connection = ConnectionState::Disconnected;
                self.simulated = true;
                self.last_error = Some(e.to_string());
                synthesizer.synthesize(now)
            }
        };

        self.current = Some(reading);

        if self.detector.accept(&reading, now) {
            self.aggregator
                .record(reading.distance(), reading.angle(), &outcome.history);
            tracing::debug!(
                "Fetch #{}: accepted {} (session pings {})",
                outcome.seq,
                reading,
                self.aggregator.stats().session_pings
            );
            FetchDisposition::Accepted
        } else {
            tracing::debug!("Fetch #{}: repeat of {}", outcome.seq, reading);
            FetchDisposition::Repeated
        }
    }

    /// Apply a health check result; only the connection state changes
    pub fn apply_health(&mut self, result: &crate::Result<()>) {
        let next = match result {
            Ok(()) => ConnectionState::Connected,
            Err(e) => {
                tracing::debug!("Health check failed: {}", e);
                ConnectionState::Disconnected
            }
        };
        if next != self.connection {
            tracing::info!("Connection state {} -> {}", self.connection, next);
        }
        self.connection = next;
    }

    /// Read-only view for presentation
    pub fn snapshot(&self, mapper: &CoordinateMapper) -> TelemetrySnapshot {
        let track = |reading: &Reading| TrackedReading {
            reading: *reading,
            position: mapper.reading_position(reading),
            threat: classify(reading.distance()),
        };

        TelemetrySnapshot {
            phase: self.phase,
            connection: self.connection,
            simulated: self.simulated,
            current: self.current.as_ref().map(track),
            recent: self.recent.iter().map(track).collect(),
            stats: self.aggregator.stats().clone(),
            consecutive_failures: self.consecutive_failures,
            last_error: self.last_error.clone(),
            last_fetch_epoch_ms: self.last_fetch_epoch_ms,
        }
    }
}

/// A reading with its projected position and threat tier
#[derive(Debug, Clone, Serialize)]
pub struct TrackedReading {
    #[serde(flatten)]
    pub reading: Reading,
    pub position: Position,
    pub threat: ThreatAssessment,
}

/// Point-in-time copy of [`Telemetry`] for presentation
#[derive(Debug, Clone, Serialize)]
pub struct TelemetrySnapshot {
    pub phase: AcquisitionPhase,
    pub connection: ConnectionState,
    pub simulated: bool,
    pub current: Option<TrackedReading>,
    pub recent: Vec<TrackedReading>,
    pub stats: RunningStats,
    pub consecutive_failures: u32,
    pub last_error: Option<String>,
    pub last_fetch_epoch_ms: u64,
}

/// Shared handle; the acquisition loop is the only writer
pub type StateHandle = Arc<RwLock<Telemetry>>;

pub fn new_state_handle(change_detection: ChangeDetectionConfig) -> StateHandle {
    Arc::new(RwLock::new(Telemetry::new(change_detection)))
}
