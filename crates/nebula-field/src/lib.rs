//! Point field background for the nebula landing page.
//!
//! A fixed cloud of points is sampled uniformly inside a sphere once, then
//! drifts about two axes at slightly different rates so the pattern never
//! visibly repeats. Each frame the cloud is projected through a perspective
//! camera onto the terminal grid and drawn as a density map of glyphs.

mod animator;
mod chars;
mod cloud;
mod projection;
mod render;

pub use animator::{DriftRate, FieldAnimator, Orientation};
pub use cloud::{Point, PointCloud};
pub use projection::{Camera, Projected};
pub use render::{DensityCell, DensityGrid, FieldStyle, rasterize, render};
