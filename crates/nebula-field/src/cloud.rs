//! Point cloud sampling.

use rand::Rng;
use tracing::debug;

use nebula_core::{NebulaError, Result};

/// A point in field space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Point {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn distance_from_origin(&self) -> f32 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }
}

/// Immutable set of points inside a sphere.
#[derive(Debug, Clone, PartialEq)]
pub struct PointCloud {
    points: Vec<Point>,
    radius: f32,
}

impl PointCloud {
    /// Sample `count` points uniformly in the volume of a sphere of `radius`.
    pub fn in_sphere(count: usize, radius: f32) -> Result<Self> {
        Self::in_sphere_with(count, radius, &mut rand::thread_rng())
    }

    /// Same as [`PointCloud::in_sphere`] with a caller-provided generator.
    pub fn in_sphere_with<R: Rng + ?Sized>(count: usize, radius: f32, rng: &mut R) -> Result<Self> {
        if count == 0 {
            return Err(NebulaError::invalid("field.count", "must be at least 1"));
        }
        if !(radius.is_finite() && radius > 0.0) {
            return Err(NebulaError::invalid(
                "field.radius",
                format!("must be positive, got {radius}"),
            ));
        }

        // Rejection sampling from the bounding cube. Sampling the radius
        // directly would crowd points toward the center.
        let mut points = Vec::with_capacity(count);
        while points.len() < count {
            let p = Point::new(
                rng.gen_range(-radius..=radius),
                rng.gen_range(-radius..=radius),
                rng.gen_range(-radius..=radius),
            );
            if p.distance_from_origin() <= radius {
                points.push(p);
            }
        }

        debug!(count, radius, "sampled point cloud");
        Ok(Self { points, radius })
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }
}
