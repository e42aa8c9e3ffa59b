//! Repeat suppression for polled readings
//!
//! The source is polled faster than the sensor produces values, so the same
//! reading is often delivered twice. Only readings that moved, or that arrive
//! after the staleness window, count as new.

use crate::config::ChangeDetectionConfig;
use crate::reading::Reading;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Accepted {
    reading: Reading,
    accepted_at: f64,
}

/// Decides whether an incoming reading is new or a repeat
#[derive(Debug, Clone)]
pub struct ChangeDetector {
    config: ChangeDetectionConfig,
    last: Option<Accepted>,
}

impl Default for ChangeDetector {
    fn default() -> Self {
        Self::new(ChangeDetectionConfig::default())
    }
}

impl ChangeDetector {
    pub fn new(config: ChangeDetectionConfig) -> Self {
        Self { config, last: None }
    }

    /// The most recent accepted reading, if any
    pub fn last_accepted(&self) -> Option<&Reading> {
        self.last.as_ref().map(|a| &a.reading)
    }

    /// Whether `reading` would be accepted at wall-clock time `now` (unix seconds)
    pub fn is_new(&self, reading: &Reading, now: f64) -> bool {
        let Some(last) = &self.last else {
            return true;
        };

        (reading.distance() - last.reading.distance()).abs() > self.config.distance_epsilon
            || (reading.angle() - last.reading.angle()).abs() > self.config.angle_epsilon_degrees
            || now - last.accepted_at > self.config.stale_after_seconds
    }

    /// Accept `reading` if it is new, remembering it and the acceptance time.
    ///
    /// Returns `true` when the reading was accepted.
    pub fn accept(&mut self, reading: &Reading, now: f64) -> bool {
        if !self.is_new(reading, now) {
            return false;
        }
        self.last = Some(Accepted {
            reading: *reading,
            accepted_at: now,
        });
        true
    }
}
