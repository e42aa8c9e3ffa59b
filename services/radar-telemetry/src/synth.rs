//! Synthetic readings used while the source is unreachable

use std::collections::VecDeque;
use std::ops::RangeInclusive;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::reading::{Reading, MAX_ANGLE_DEGREES};

/// Range of synthesized distances
pub const SYNTHETIC_DISTANCE: RangeInclusive<f64> = 10.0..=110.0;

/// Produces a stand-in reading when no real one is available
pub trait ReadingSynthesizer: Send + std::fmt::Debug {
    /// Build a reading stamped with `now` (unix seconds)
    fn synthesize(&mut self, now: f64) -> Reading;
}

/// Uniformly random bearing in [0, 180] and distance in [10, 110]
#[derive(Debug)]
pub struct RandomSynthesizer {
    rng: StdRng,
}

impl RandomSynthesizer {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Deterministic generator, mostly for tests
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomSynthesizer {
    fn default() -> Self {
        Self::new()
    }
}

impl ReadingSynthesizer for RandomSynthesizer {
    fn synthesize(&mut self, now: f64) -> Reading {
        let angle = self.rng.gen_range(0.0..=MAX_ANGLE_DEGREES);
        let distance = self.rng.gen_range(SYNTHETIC_DISTANCE);
        Reading::new(angle, distance, now)
    }
}

/// Replays a fixed list of `(angle, distance)` pairs, cycling when exhausted
#[derive(Debug, Clone)]
pub struct FixedSequenceSynthesizer {
    values: VecDeque<(f64, f64)>,
}

impl FixedSequenceSynthesizer {
    pub fn new(values: impl IntoIterator<Item = (f64, f64)>) -> Self {
        Self {
            values: values.into_iter().collect(),
        }
    }
}

impl ReadingSynthesizer for FixedSequenceSynthesizer {
    fn synthesize(&mut self, now: f64) -> Reading {
        match self.values.pop_front() {
            Some((angle, distance)) => {
                self.values.push_back((angle, distance));
                Reading::new(angle, distance, now)
            }
            None => Reading::new(0.0, *SYNTHETIC_DISTANCE.start(), now),
        }
    }
}
