//! Polar to ground-plane projection
//!
//! Every position shown to the operator goes through [`CoordinateMapper::to_position`].
//!
//! Winding: angles increase counter-clockwise from the +x axis. 0° lands on
//! +x, 90° on +z and 180° on -x, so the sweep covers the half plane `z >= 0`.

use serde::{Deserialize, Serialize};

use crate::reading::{Reading, MAX_ANGLE_DEGREES};

/// Default factor applied to a distance before projection
pub const DEFAULT_DISTANCE_SCALE: f64 = 0.5;

/// A point on the display ground plane
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub z: f64,
}

/// Projects readings onto the ground plane using a fixed display scale
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateMapper {
    scale: f64,
}

impl Default for CoordinateMapper {
    fn default() -> Self {
        Self::new(DEFAULT_DISTANCE_SCALE)
    }
}

impl CoordinateMapper {
    pub fn new(scale: f64) -> Self {
        Self { scale }
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Project a bearing and range onto the ground plane.
    ///
    /// Angles outside [0, 180] are clamped, negative distances become 0.
    /// Non-finite inputs are treated as 0.
    pub fn to_position(&self, angle: f64, distance: f64) -> Position {
        let angle = if angle.is_finite() {
            angle.clamp(0.0, MAX_ANGLE_DEGREES)
        } else {
            0.0
        };
        let distance = if distance.is_finite() {
            distance.max(0.0)
        } else {
            0.0
        };

        let radius = distance * self.scale;
        let theta = angle.to_radians();
        Position {
            x: radius * theta.cos(),
            z: radius * theta.sin(),
        }
    }

    pub fn reading_position(&self, reading: &Reading) -> Position {
        self.to_position(reading.angle(), reading.distance())
    }
}
