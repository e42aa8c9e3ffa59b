//! BDD step definitions for display mapping and threat classification

use cucumber::{given, then, when};

use radar_telemetry::{classify, CoordinateMapper, ThreatTier};

use crate::world::TelemetryWorld;

const TOLERANCE: f64 = 1e-9;

#[given(expr = "a coordinate mapper with scale {float}")]
fn mapper_with_scale(world: &mut TelemetryWorld, scale: f64) {
    world.scale = Some(scale);
}

#[when(expr = "a reading at {float} degrees and {float} units is projected")]
fn project(world: &mut TelemetryWorld, angle: f64, distance: f64) {
    let scale = world.scale.expect("mapper scale not set");
    world.position = Some(CoordinateMapper::new(scale).to_position(angle, distance));
}

#[when(expr = "a distance of {float} is classified")]
fn classify_distance(world: &mut TelemetryWorld, distance: f64) {
    world.threat = Some(classify(distance));
}

#[then(expr = "the position should be x {float} and z {float}")]
fn position_is(world: &mut TelemetryWorld, x: f64, z: f64) {
    let position = world.position.expect("nothing projected");
    assert!(
        (position.x - x).abs() < TOLERANCE,
        "x was {}, expected {}",
        position.x,
        x
    );
    assert!(
        (position.z - z).abs() < TOLERANCE,
        "z was {}, expected {}",
        position.z,
        z
    );
}

#[then(expr = "the threat tier should be {word}")]
fn tier_is(world: &mut TelemetryWorld, tier: String) {
    let expected = match tier.as_str() {
        "CRITICAL" => ThreatTier::Critical,
        "HIGH" => ThreatTier::High,
        "MODERATE" => ThreatTier::Moderate,
        other => panic!("unknown tier: {}", other),
    };
    assert_eq!(world.threat.expect("nothing classified").tier, expected);
}

#[then(expr = "the display color should be {string}")]
fn color_is(world: &mut TelemetryWorld, color: String) {
    assert_eq!(world.threat.expect("nothing classified").display_color, color);
}
