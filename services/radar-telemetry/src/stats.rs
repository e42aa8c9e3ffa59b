//! Rolling and all-time statistics over accepted readings

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

/// Number of values kept in the rolling windows
pub const ROLLING_WINDOW: usize = 5;

/// Statistics shown alongside the live picture
///
/// `all_time_*` describe the distance history supplied with the most recent
/// accepted reading. With no history, `all_time_samples` is 0, the average
/// and maximum are 0 and the minimum is `+inf` (serialized as `null`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunningStats {
    pub session_pings: u64,
    pub daily_pings: u64,
    pub last_five: VecDeque<f64>,
    pub last_five_bearings: VecDeque<f64>,
    pub all_time_avg: f64,
    pub all_time_min: f64,
    pub all_time_max: f64,
    pub all_time_samples: usize,
}

impl Default for RunningStats {
    fn default() -> Self {
        Self {
            session_pings: 0,
            daily_pings: 0,
            last_five: VecDeque::with_capacity(ROLLING_WINDOW),
            last_five_bearings: VecDeque::with_capacity(ROLLING_WINDOW),
            all_time_avg: 0.0,
            all_time_min: f64::INFINITY,
            all_time_max: 0.0,
            all_time_samples: 0,
        }
    }
}

impl RunningStats {
    /// Whether the all-time figures are backed by any history
    pub fn has_history(&self) -> bool {
        self.all_time_samples > 0
    }

    /// All-time minimum formatted for display, `"0.0"` when there is no history
    pub fn display_min(&self) -> String {
        if self.all_time_min.is_finite() {
            format!("{:.1}", self.all_time_min)
        } else {
            "0.0".to_string()
        }
    }
}

/// Owns [`RunningStats`] and updates it for each accepted reading
#[derive(Debug, Clone, Default)]
pub struct StatisticsAggregator {
    stats: RunningStats,
}

impl StatisticsAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stats(&self) -> &RunningStats {
        &self.stats
    }

    /// Record an accepted reading.
    ///
    /// All-time figures are recomputed from `full_history` on every call.
    /// Non-finite history values are skipped.
    pub fn record(&mut self, distance: f64, angle: f64, full_history: &[f64]) {
        self.stats.session_pings += 1;
        self.stats.daily_pings += 1;

        push_bounded(&mut self.stats.last_five, distance);
        push_bounded(&mut self.stats.last_five_bearings, angle);

        let mut sum = 0.0;
        let mut min = f64::INFINITY;
        let mut max = 0.0_f64;
        let mut count = 0usize;
        for &d in full_history.iter().filter(|d| d.is_finite()) {
            sum += d;
            min = min.min(d);
            max = max.max(d);
            count += 1;
        }

        self.stats.all_time_samples = count;
        self.stats.all_time_min = min;
        self.stats.all_time_max = max;
        self.stats.all_time_avg = if count == 0 { 0.0 } else { sum / count as f64 };
    }
}

fn push_bounded(window: &mut VecDeque<f64>, value: f64) {
    if window.len() >= ROLLING_WINDOW {
        window.pop_front();
    }
    window.push_back(value);
}
