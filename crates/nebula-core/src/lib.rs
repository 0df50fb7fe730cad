//! Core types for the nebula landing page.
//!
//! Everything here is shared between the point field, the text cycle and the
//! host binary: theme and speed settings, the error type, and the small set of
//! motion primitives (easing curves, transition descriptors, springs, interval
//! timers) that both animated components are built from.

mod error;
mod lifecycle;
mod motion;
mod spring;
mod theme;
mod timer;

pub use error::{NebulaError, Result};
pub use lifecycle::{Mounted, Tick};
pub use motion::{Easing, Pose, Transition};
pub use spring::{Spring, SpringConfig};
pub use theme::{AnimationSpeed, ColorTheme};
pub use timer::IntervalTimer;
