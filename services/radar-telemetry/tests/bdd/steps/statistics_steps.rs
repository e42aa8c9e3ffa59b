//! BDD step definitions for statistics feature

use cucumber::{given, then, when};

use radar_telemetry::stats::StatisticsAggregator;

use crate::world::TelemetryWorld;

fn parse_list(list: &str) -> Vec<f64> {
    list.split(',')
        .map(|v| {
            v.trim()
                .parse()
                .unwrap_or_else(|_| panic!("not a number: {}", v))
        })
        .collect()
}

fn aggregator(world: &TelemetryWorld) -> &StatisticsAggregator {
    world.aggregator.as_ref().expect("aggregator not set")
}

#[given("a fresh statistics aggregator")]
fn fresh_aggregator(world: &mut TelemetryWorld) {
    world.aggregator = Some(StatisticsAggregator::new());
}

#[when(regex = r"^distances (.+) are accepted in order$")]
fn distances_accepted(world: &mut TelemetryWorld, list: String) {
    let distances = parse_list(&list);
    let aggregator = world.aggregator.as_mut().expect("aggregator not set");
    let mut history = Vec::new();
    for (i, d) in distances.into_iter().enumerate() {
        history.push(d);
        aggregator.record(d, i as f64 * 15.0, &history);
    }
}

#[when(expr = "a distance of {float} is accepted without history")]
fn accepted_without_history(world: &mut TelemetryWorld, distance: f64) {
    let aggregator = world.aggregator.as_mut().expect("aggregator not set");
    aggregator.record(distance, 90.0, &[]);
}

#[then(expr = "the all-time average should be {float}")]
fn all_time_avg(world: &mut TelemetryWorld, expected: f64) {
    assert_eq!(aggregator(world).stats().all_time_avg, expected);
}

#[then(expr = "the all-time minimum should be {float}")]
fn all_time_min(world: &mut TelemetryWorld, expected: f64) {
    assert_eq!(aggregator(world).stats().all_time_min, expected);
}

#[then(expr = "the all-time maximum should be {float}")]
fn all_time_max(world: &mut TelemetryWorld, expected: f64) {
    assert_eq!(aggregator(world).stats().all_time_max, expected);
}

#[then(regex = r"^the last five distances should be (.+)$")]
fn last_five(world: &mut TelemetryWorld, list: String) {
    let actual: Vec<f64> = aggregator(world).stats().last_five.iter().copied().collect();
    assert_eq!(actual, parse_list(&list));
}

#[then(expr = "the session ping count should be {int}")]
fn session_pings(world: &mut TelemetryWorld, expected: u64) {
    assert_eq!(aggregator(world).stats().session_pings, expected);
}

#[then(expr = "the displayed all-time minimum should be {string}")]
fn display_min(world: &mut TelemetryWorld, expected: String) {
    assert_eq!(aggregator(world).stats().display_min(), expected);
}

#[then("the statistics should report no history")]
fn no_history(world: &mut TelemetryWorld) {
    assert!(!aggregator(world).stats().has_history());
}
