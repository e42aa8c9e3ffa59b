//! Threat tiers derived from target range

use serde::{Deserialize, Serialize};
use std::fmt;

/// Below this range a target is critical
pub const CRITICAL_BELOW: f64 = 30.0;
/// Below this range (and at or above [`CRITICAL_BELOW`]) a target is high
pub const HIGH_BELOW: f64 = 60.0;

/// Discrete threat tier, ordered from least to most severe
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ThreatTier {
    Moderate,
    High,
    Critical,
}

impl ThreatTier {
    pub fn display_color(&self) -> &'static str {
        match self {
            ThreatTier::Critical => "#ff0000",
            ThreatTier::High => "#ff8800",
            ThreatTier::Moderate => "#00ff41",
        }
    }
}

impl fmt::Display for ThreatTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThreatTier::Critical => write!(f, "CRITICAL"),
            ThreatTier::High => write!(f, "HIGH"),
            ThreatTier::Moderate => write!(f, "MODERATE"),
        }
    }
}

/// Tier plus the color the presentation layer should use for it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ThreatAssessment {
    pub tier: ThreatTier,
    pub display_color: &'static str,
}

/// Classify a target range.
///
/// NaN, infinite and negative distances are malformed and classify as
/// [`ThreatTier::Moderate`].
pub fn classify(distance: f64) -> ThreatAssessment {
    let tier = if !distance.is_finite() || distance < 0.0 {
        ThreatTier::Moderate
    } else if distance < CRITICAL_BELOW {
        ThreatTier::Critical
    } else if distance < HIGH_BELOW {
        ThreatTier::High
    } else {
        ThreatTier::Moderate
    };

    ThreatAssessment {
        tier,
        display_color: tier.display_color(),
    }
}
