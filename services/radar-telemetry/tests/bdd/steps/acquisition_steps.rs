//! BDD step definitions for acquisition feature

use cucumber::{given, then, when};

use radar_telemetry::config::ChangeDetectionConfig;
use radar_telemetry::state::{AcquisitionPhase, FetchDisposition, FetchOutcome, Telemetry};
use radar_telemetry::synth::RandomSynthesizer;
use radar_telemetry::{ConnectionState, Reading, TelemetryError};

use crate::world::TelemetryWorld;

fn parse_phase(phase: &str) -> AcquisitionPhase {
    match phase {
        "initializing" => AcquisitionPhase::Initializing,
        "live" => AcquisitionPhase::Live,
        "degraded" => AcquisitionPhase::Degraded,
        other => panic!("unknown phase: {}", other),
    }
}

fn apply(world: &mut TelemetryWorld, outcome: FetchOutcome) {
    let telemetry = world.telemetry.as_mut().expect("telemetry not set");
    let synthesizer = world.synthesizer.as_mut().expect("synthesizer not set");
    world.last_disposition = Some(telemetry.apply_fetch(outcome, synthesizer, world.clock));
}

fn telemetry(world: &TelemetryWorld) -> &Telemetry {
    world.telemetry.as_ref().expect("telemetry not set")
}

#[given(expr = "a telemetry state starting at {float} seconds")]
fn telemetry_state(world: &mut TelemetryWorld, at: f64) {
    world.telemetry = Some(Telemetry::new(ChangeDetectionConfig::default()));
    world.synthesizer = Some(RandomSynthesizer::seeded(7));
    world.clock = at;
}

#[when(expr = "{float} seconds pass")]
fn seconds_pass(world: &mut TelemetryWorld, seconds: f64) {
    world.clock += seconds;
}

#[when(expr = "fetch {int} returns a reading at {float} degrees and {float} units")]
fn fetch_succeeds(world: &mut TelemetryWorld, seq: u64, angle: f64, distance: f64) {
    let reading = Reading::new(angle, distance, world.clock);
    let outcome = FetchOutcome {
        seq,
        latest: Ok(reading),
        recent: Some(vec![reading]),
        history: vec![distance],
    };
    apply(world, outcome);
}

#[when(expr = "fetch {int} fails")]
fn fetch_fails(world: &mut TelemetryWorld, seq: u64) {
    let outcome = FetchOutcome {
        seq,
        latest: Err(TelemetryError::SourceUnavailable(
            "connection refused".to_string(),
        )),
        recent: None,
        history: Vec::new(),
    };
    apply(world, outcome);
}

#[then(expr = "the acquisition phase should be {word}")]
fn phase_is(world: &mut TelemetryWorld, phase: String) {
    assert_eq!(telemetry(world).phase(), parse_phase(&phase));
}

#[then("the source should be reported connected")]
fn reported_connected(world: &mut TelemetryWorld) {
    assert_eq!(telemetry(world).connection(), ConnectionState::Connected);
}

#[then("the source should be reported disconnected")]
fn reported_disconnected(world: &mut TelemetryWorld) {
    assert_eq!(telemetry(world).connection(), ConnectionState::Disconnected);
}

#[then(expr = "the current reading should be at {float} degrees and {float} units")]
fn current_is(world: &mut TelemetryWorld, angle: f64, distance: f64) {
    let current = telemetry(world).current().expect("no current reading");
    assert_eq!(current.angle(), angle);
    assert_eq!(current.distance(), distance);
}

#[then("the current reading should be simulated within the sweep")]
fn current_is_simulated(world: &mut TelemetryWorld) {
    let telemetry = telemetry(world);
    assert!(telemetry.is_simulated());
    let current = telemetry.current().expect("no current reading");
    assert!((0.0..=180.0).contains(&current.angle()));
    assert!((10.0..=110.0).contains(&current.distance()));
}

#[then("the fetch should have been discarded as stale")]
fn discarded_as_stale(world: &mut TelemetryWorld) {
    assert_eq!(world.last_disposition, Some(FetchDisposition::Stale));
}

#[then("the fetch should have been treated as a repeat")]
fn treated_as_repeat(world: &mut TelemetryWorld) {
    assert_eq!(world.last_disposition, Some(FetchDisposition::Repeated));
}

#[then(expr = "the telemetry should count {int} session pings")]
fn telemetry_session_pings(world: &mut TelemetryWorld, expected: u64) {
    assert_eq!(telemetry(world).stats().session_pings, expected);
}

#[then(expr = "the trail should hold {int} readings")]
fn trail_len(world: &mut TelemetryWorld, expected: usize) {
    assert_eq!(telemetry(world).recent().len(), expected);
}
