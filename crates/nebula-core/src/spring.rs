//! Damped spring used to relax a value toward a target.
//!
//! Only critically damped and over-damped springs can be built, so a value
//! released from rest never oscillates around its target. Each step uses the
//! closed-form solution of the oscillator, which keeps the motion identical no
//! matter how elapsed time is sliced into frames.

use crate::error::{NebulaError, Result};

const CRITICAL_EPSILON: f32 = 1e-4;
const REST_DELTA: f32 = 0.005;
const REST_SPEED: f32 = 0.01;

/// Physical constants of a spring.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringConfig {
    stiffness: f32,
    damping: f32,
    mass: f32,
}

impl Default for SpringConfig {
    /// Stiffness 150 and mass 1.2 with critical damping.
    fn default() -> Self {
        Self {
            stiffness: 150.0,
            damping: critical_damping(150.0, 1.2),
            mass: 1.2,
        }
    }
}

fn critical_damping(stiffness: f32, mass: f32) -> f32 {
    2.0 * (stiffness * mass).sqrt()
}

impl SpringConfig {
    /// Build a spring, rejecting constants that would oscillate.
    pub fn new(stiffness: f32, damping: f32, mass: f32) -> Result<Self> {
        if !(stiffness.is_finite() && stiffness > 0.0) {
            return Err(NebulaError::invalid(
                "spring.stiffness",
                format!("must be positive, got {stiffness}"),
            ));
        }
        if !(mass.is_finite() && mass > 0.0) {
            return Err(NebulaError::invalid(
                "spring.mass",
                format!("must be positive, got {mass}"),
            ));
        }
        if !damping.is_finite() {
            return Err(NebulaError::invalid("spring.damping", "must be finite"));
        }
        let config = Self {
            stiffness,
            damping,
            mass,
        };
        if config.damping_ratio() < 1.0 - CRITICAL_EPSILON {
            return Err(NebulaError::invalid(
                "spring.damping",
                format!(
                    "damping ratio {:.3} is below critical; use at least {:.3}",
                    config.damping_ratio(),
                    critical_damping(stiffness, mass)
                ),
            ));
        }
        Ok(config)
    }

    /// Critically damped spring for the given stiffness and mass.
    pub fn critical(stiffness: f32, mass: f32) -> Result<Self> {
        Self::new(stiffness, critical_damping(stiffness, mass), mass)
    }

    pub fn stiffness(&self) -> f32 {
        self.stiffness
    }

    pub fn damping(&self) -> f32 {
        self.damping
    }

    pub fn mass(&self) -> f32 {
        self.mass
    }

    /// Undamped angular frequency, sqrt(k/m).
    pub fn omega(&self) -> f32 {
        (self.stiffness / self.mass).sqrt()
    }

    /// c / (2 * sqrt(k*m)); 1.0 is critical.
    pub fn damping_ratio(&self) -> f32 {
        self.damping / critical_damping(self.stiffness, self.mass)
    }
}

/// A value relaxing toward a target.
#[derive(Debug, Clone, PartialEq)]
pub struct Spring {
    value: f32,
    velocity: f32,
    target: f32,
    config: SpringConfig,
}

impl Spring {
    /// A spring at rest on `value`.
    pub fn new(value: f32, config: SpringConfig) -> Self {
        Self {
            value,
            velocity: 0.0,
            target: value,
            config,
        }
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    /// Retarget the spring, keeping its current value and velocity.
    pub fn set_target(&mut self, target: f32) {
        self.target = target;
    }

    /// Jump to `value` and rest there.
    pub fn snap_to(&mut self, value: f32) {
        self.value = value;
        self.target = value;
        self.velocity = 0.0;
    }

    pub fn is_settled(&self) -> bool {
        self.value == self.target && self.velocity == 0.0
    }

    /// Advance the spring by `dt` seconds. Returns true once settled.
    pub fn step(&mut self, dt: f32) -> bool {
        if self.is_settled() || dt <= 0.0 {
            return self.is_settled();
        }

        let x0 = self.value - self.target;
        let v0 = self.velocity;
        if x0 == 0.0 {
            // Retargeted onto the current value while moving: any further
            // motion would carry it past the target.
            self.velocity = 0.0;
            return true;
        }
        let w = self.config.omega();
        let zeta = self.config.damping_ratio();

        let (x, v) = if zeta <= 1.0 + CRITICAL_EPSILON {
            // x(t) = (c1 + c2 t) e^(-w t)
            let c1 = x0;
            let c2 = v0 + w * x0;
            let e = (-w * dt).exp();
            ((c1 + c2 * dt) * e, (c2 - w * (c1 + c2 * dt)) * e)
        } else {
            // x(t) = a e^(r1 t) + b e^(r2 t)
            let root = (zeta * zeta - 1.0).sqrt();
            let r1 = -w * (zeta - root);
            let r2 = -w * (zeta + root);
            let a = (v0 - r2 * x0) / (r1 - r2);
            let b = x0 - a;
            let (e1, e2) = ((r1 * dt).exp(), (r2 * dt).exp());
            (a * e1 + b * e2, r1 * a * e1 + r2 * b * e2)
        };

        // A retarget with a lot of momentum could carry the value through the
        // target; stop on it instead.
        let crossed = x.signum() != x0.signum();
        if crossed || (x.abs() < REST_DELTA && v.abs() < REST_SPEED) {
            self.value = self.target;
            self.velocity = 0.0;
            return true;
        }

        self.value = self.target + x;
        self.velocity = v;
        false
    }
}
