//! BDD step definitions for change detection feature

use cucumber::{given, then, when};

use radar_telemetry::change::ChangeDetector;
use radar_telemetry::Reading;

use crate::world::TelemetryWorld;

#[given("a fresh change detector")]
fn fresh_detector(world: &mut TelemetryWorld) {
    world.detector = Some(ChangeDetector::default());
}

#[when(expr = "a reading at {float} degrees and {float} units arrives at {float} seconds")]
fn reading_arrives(world: &mut TelemetryWorld, angle: f64, distance: f64, at: f64) {
    let detector = world.detector.as_mut().expect("detector not set");
    let accepted = detector.accept(&Reading::new(angle, distance, at), at);
    world.last_accepted = Some(accepted);
}

#[then("the reading should have been accepted")]
fn was_accepted(world: &mut TelemetryWorld) {
    assert_eq!(world.last_accepted, Some(true), "expected acceptance");
}

#[then("the reading should have been rejected")]
fn was_rejected(world: &mut TelemetryWorld) {
    assert_eq!(world.last_accepted, Some(false), "expected rejection");
}

#[then(expr = "the last accepted reading should be at {float} degrees and {float} units")]
fn last_accepted_is(world: &mut TelemetryWorld, angle: f64, distance: f64) {
    let detector = world.detector.as_ref().expect("detector not set");
    let last = detector.last_accepted().expect("nothing accepted");
    assert_eq!(last.angle(), angle);
    assert_eq!(last.distance(), distance);
}
