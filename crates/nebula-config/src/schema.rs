//! Config file schema and validation.

use std::time::Duration;

use nebula_core::{AnimationSpeed, ColorTheme, NebulaError, SpringConfig};
use serde::{Deserialize, Serialize};

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub theme: ColorTheme,
    pub speed: AnimationSpeed,
    /// Tracing filter directive, e.g. `nebula=debug`.
    pub log_level: Option<String>,
    pub field: FieldSettings,
    pub cycle: CycleSettings,
    pub spring: SpringSettings,
}

/// Point field background.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldSettings {
    /// Number of points in the cloud.
    pub count: usize,
    /// Radius of the sphere the points are sampled in.
    pub radius: f32,
    /// Point size (presentation only).
    pub size: f32,
    /// Seconds per radian of drift about X; Y drifts 4/5 as fast.
    pub drift_divisor: f64,
    /// Fixed roll of the field about the view axis, in radians.
    pub tilt: f32,
}

impl Default for FieldSettings {
    fn default() -> Self {
        Self {
            count: 5000,
            radius: 1.2,
            size: 0.002,
            drift_divisor: 100.0,
            tilt: std::f32::consts::FRAC_PI_4,
        }
    }
}

/// Headline word cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CycleSettings {
    pub words: Vec<String>,
    pub interval_ms: u64,
}

impl Default for CycleSettings {
    fn default() -> Self {
        Self {
            words: ["innovation", "creativity", "excellence", "wonder"]
                .into_iter()
                .map(String::from)
                .collect(),
            interval_ms: 2500,
        }
    }
}

impl CycleSettings {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

/// Container width spring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpringSettings {
    pub stiffness: f32,
    pub mass: f32,
    /// Damping coefficient; critical damping when omitted.
    pub damping: Option<f32>,
}

impl Default for SpringSettings {
    fn default() -> Self {
        Self {
            stiffness: 150.0,
            mass: 1.2,
            damping: None,
        }
    }
}

impl SpringSettings {
    pub fn to_spring(&self) -> nebula_core::Result<SpringConfig> {
        match self.damping {
            Some(damping) => SpringConfig::new(self.stiffness, damping, self.mass),
            None => SpringConfig::critical(self.stiffness, self.mass),
        }
    }
}

impl Config {
    /// Check every value the animated components would reject.
    pub fn validate(&self) -> nebula_core::Result<()> {
        if self.field.count == 0 {
            return Err(NebulaError::invalid("field.count", "must be at least 1"));
        }
        if !(self.field.radius.is_finite() && self.field.radius > 0.0) {
            return Err(NebulaError::invalid(
                "field.radius",
                format!("must be positive, got {}", self.field.radius),
            ));
        }
        if !(self.field.drift_divisor.is_finite() && self.field.drift_divisor > 0.0) {
            return Err(NebulaError::invalid(
                "field.drift_divisor",
                format!("must be positive, got {}", self.field.drift_divisor),
            ));
        }
        if self.cycle.words.is_empty() {
            return Err(NebulaError::invalid(
                "cycle.words",
                "must contain at least one word",
            ));
        }
        if self.cycle.interval_ms == 0 {
            return Err(NebulaError::invalid(
                "cycle.interval_ms",
                "must be greater than zero",
            ));
        }
        self.spring.to_spring()?;
        Ok(())
    }
}
