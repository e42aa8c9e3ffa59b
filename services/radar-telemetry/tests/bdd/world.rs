//! BDD test world for radar telemetry service

use cucumber::World;
use radar_telemetry::change::ChangeDetector;
use radar_telemetry::mapper::Position;
use radar_telemetry::state::{FetchDisposition, Telemetry};
use radar_telemetry::stats::StatisticsAggregator;
use radar_telemetry::synth::RandomSynthesizer;
use radar_telemetry::ThreatAssessment;

#[derive(Debug, Default, World)]
pub struct TelemetryWorld {
    // Change detection
    pub detector: Option<ChangeDetector>,
    pub last_accepted: Option<bool>,

    // Statistics
    pub aggregator: Option<StatisticsAggregator>,

    // Acquisition
    pub telemetry: Option<Telemetry>,
    pub synthesizer: Option<RandomSynthesizer>,
    pub next_seq: u64,
    pub clock: f64,
    pub last_disposition: Option<FetchDisposition>,

    // Display
    pub scale: Option<f64>,
    pub position: Option<Position>,
    pub threat: Option<ThreatAssessment>,
}
