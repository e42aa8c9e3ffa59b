//! Reading and connection types

use serde::{Deserialize, Serialize};
use std::fmt;

/// Upper bound of the half-plane sweep, in degrees
pub const MAX_ANGLE_DEGREES: f64 = 180.0;

/// One polar sample from the sensor
///
/// `angle` is in degrees over a half-plane sweep (0 to 180), `distance` is
/// non-negative and `timestamp` is unix seconds. Fields are private so a
/// reading cannot be altered after construction; the values are kept as
/// delivered and clamped only where they are projected or classified.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    angle: f64,
    distance: f64,
    timestamp: f64,
}

impl Reading {
    pub fn new(angle: f64, distance: f64, timestamp: f64) -> Self {
        Self {
            angle,
            distance,
            timestamp,
        }
    }

    pub fn angle(&self) -> f64 {
        self.angle
    }

    pub fn distance(&self) -> f64 {
        self.distance
    }

    pub fn timestamp(&self) -> f64 {
        self.timestamp
    }

    /// Whether the reading lies inside the declared sensor domain
    pub fn is_well_formed(&self) -> bool {
        self.angle.is_finite()
            && (0.0..=MAX_ANGLE_DEGREES).contains(&self.angle)
            && self.distance.is_finite()
            && self.distance >= 0.0
            && self.timestamp.is_finite()
    }
}

impl fmt::Display for Reading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}° @ {:.1}", self.angle, self.distance)
    }
}

/// Reachability of the reading source as last observed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionState {
    Connected,
    #[default]
    Disconnected,
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectionState::Connected => write!(f, "Connected"),
            ConnectionState::Disconnected => write!(f, "Disconnected"),
        }
    }
}
