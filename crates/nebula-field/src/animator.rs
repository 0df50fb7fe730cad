//! Time-driven drift of the point field.

use std::time::Duration;

use nebula_core::{AnimationSpeed, NebulaError, Result, Tick};
use tracing::debug;

use crate::cloud::PointCloud;

/// Rotation applied to the field at render time, in radians.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Orientation {
    pub about_x: f64,
    pub about_y: f64,
}

/// Seconds of elapsed time per radian of drift on each axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DriftRate {
    x_divisor: f64,
    y_divisor: f64,
}

impl Default for DriftRate {
    fn default() -> Self {
        Self {
            x_divisor: 100.0,
            y_divisor: 125.0,
        }
    }
}

impl DriftRate {
    /// Y drifts at 4/5 of the X rate.
    pub const Y_RATIO: f64 = 1.25;

    /// Rate with the given X divisor and the Y divisor derived from it.
    pub fn new(x_divisor: f64) -> Result<Self> {
        Self::with_divisors(x_divisor, x_divisor * Self::Y_RATIO)
    }

    pub fn with_divisors(x_divisor: f64, y_divisor: f64) -> Result<Self> {
        for value in [x_divisor, y_divisor] {
            if !(value.is_finite() && value > 0.0) {
                return Err(NebulaError::invalid(
                    "field.drift_divisor",
                    format!("must be positive, got {value}"),
                ));
            }
        }
        Ok(Self {
            x_divisor,
            y_divisor,
        })
    }

    pub fn x_divisor(&self) -> f64 {
        self.x_divisor
    }

    pub fn y_divisor(&self) -> f64 {
        self.y_divisor
    }
}

/// Owns the point cloud and its current orientation.
#[derive(Debug, Clone)]
pub struct FieldAnimator {
    cloud: PointCloud,
    orientation: Orientation,
    drift: DriftRate,
    speed: AnimationSpeed,
}

impl FieldAnimator {
    pub fn new(cloud: PointCloud, drift: DriftRate) -> Self {
        debug!(
            points = cloud.len(),
            radius = cloud.radius(),
            x_divisor = drift.x_divisor(),
            y_divisor = drift.y_divisor(),
            "field animator created"
        );
        Self {
            cloud,
            orientation: Orientation::default(),
            drift,
            speed: AnimationSpeed::default(),
        }
    }

    pub fn cloud(&self) -> &PointCloud {
        &self.cloud
    }

    /// Snapshot of the current orientation.
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn speed(&self) -> AnimationSpeed {
        self.speed
    }

    pub fn set_speed(&mut self, speed: AnimationSpeed) {
        self.speed = speed;
    }
}

impl Tick for FieldAnimator {
    fn tick(&mut self, dt: Duration) {
        let secs = dt.as_secs_f64() * self.speed.drift_scale() as f64;
        // Compute both axes before publishing the new orientation.
        let next = Orientation {
            about_x: self.orientation.about_x - secs / self.drift.x_divisor,
            about_y: self.orientation.about_y - secs / self.drift.y_divisor,
        };
        self.orientation = next;
    }
}
