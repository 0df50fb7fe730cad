//! Declarative transition descriptors.
//!
//! A [`Transition`] is plain data: a start [`Pose`], an end [`Pose`], a
//! duration, an optional delay and an [`Easing`] curve. Sampling it at an
//! elapsed time yields the interpolated pose; nothing here owns a clock.

use std::time::Duration;

/// Timing curve applied to normalized transition progress.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum Easing {
    #[default]
    Linear,
    /// cubic-bezier(0.42, 0, 1, 1)
    EaseIn,
    /// cubic-bezier(0, 0, 0.58, 1)
    EaseOut,
    /// cubic-bezier(0.42, 0, 0.58, 1)
    EaseInOut,
}

impl Easing {
    /// Map progress `t` in 0..=1 to eased progress in 0..=1.
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseIn => cubic_bezier(0.42, 0.0, 1.0, 1.0, t),
            Easing::EaseOut => cubic_bezier(0.0, 0.0, 0.58, 1.0, t),
            Easing::EaseInOut => cubic_bezier(0.42, 0.0, 0.58, 1.0, t),
        }
    }
}

/// Evaluate a CSS-style cubic bezier with endpoints (0,0) and (1,1).
fn cubic_bezier(x1: f32, y1: f32, x2: f32, y2: f32, x: f32) -> f32 {
    if x <= 0.0 {
        return 0.0;
    }
    if x >= 1.0 {
        return 1.0;
    }

    let bezier = |a: f32, b: f32, s: f32| {
        let inv = 1.0 - s;
        3.0 * inv * inv * s * a + 3.0 * inv * s * s * b + s * s * s
    };
    let slope = |a: f32, b: f32, s: f32| {
        let inv = 1.0 - s;
        3.0 * inv * inv * a + 6.0 * inv * s * (b - a) + 3.0 * s * s * (1.0 - b)
    };

    // Newton first, bisection when the slope flattens out.
    let mut s = x;
    for _ in 0..8 {
        let err = bezier(x1, x2, s) - x;
        if err.abs() < 1e-6 {
            return bezier(y1, y2, s);
        }
        let d = slope(x1, x2, s);
        if d.abs() < 1e-6 {
            break;
        }
        s = (s - err / d).clamp(0.0, 1.0);
    }

    let (mut lo, mut hi) = (0.0_f32, 1.0_f32);
    s = x;
    for _ in 0..32 {
        let v = bezier(x1, x2, s);
        if (v - x).abs() < 1e-6 {
            break;
        }
        if v < x {
            lo = s;
        } else {
            hi = s;
        }
        s = (lo + hi) / 2.0;
    }
    bezier(y1, y2, s)
}

/// Visual state of a piece of animated content.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    /// Vertical offset in pixels (positive is downward).
    pub offset_y: f32,
    /// Opacity (0.0 - 1.0).
    pub opacity: f32,
    /// Blur radius in pixels.
    pub blur: f32,
}

impl Pose {
    /// Pre-enter pose: above the resting position, transparent and blurred.
    pub const HIDDEN: Pose = Pose {
        offset_y: -20.0,
        opacity: 0.0,
        blur: 8.0,
    };

    /// Resting pose.
    pub const VISIBLE: Pose = Pose {
        offset_y: 0.0,
        opacity: 1.0,
        blur: 0.0,
    };

    /// Post-exit pose: below the resting position, transparent and blurred.
    pub const EXITED: Pose = Pose {
        offset_y: 20.0,
        opacity: 0.0,
        blur: 8.0,
    };

    /// Starting pose of a section that rises into view.
    pub const BELOW: Pose = Pose {
        offset_y: 20.0,
        opacity: 0.0,
        blur: 0.0,
    };

    /// Linear interpolation between two poses.
    pub fn lerp(self, to: Pose, t: f32) -> Pose {
        let mix = |a: f32, b: f32| a + (b - a) * t;
        Pose {
            offset_y: mix(self.offset_y, to.offset_y),
            opacity: mix(self.opacity, to.opacity).clamp(0.0, 1.0),
            blur: mix(self.blur, to.blur).max(0.0),
        }
    }

    pub fn is_opaque(&self) -> bool {
        self.opacity >= 1.0
    }

    pub fn is_transparent(&self) -> bool {
        self.opacity <= 0.0
    }
}

/// A timed move from one pose to another.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    pub from: Pose,
    pub to: Pose,
    pub duration: Duration,
    pub delay: Duration,
    pub easing: Easing,
}

impl Transition {
    pub fn new(from: Pose, to: Pose, duration: Duration, easing: Easing) -> Self {
        Self {
            from,
            to,
            duration,
            delay: Duration::ZERO,
            easing,
        }
    }

    /// Incoming word: hidden to visible in 0.4s, ease-out.
    pub fn enter() -> Self {
        Self::new(
            Pose::HIDDEN,
            Pose::VISIBLE,
            Duration::from_millis(400),
            Easing::EaseOut,
        )
    }

    /// Outgoing word: visible to exited in 0.3s, ease-in.
    pub fn exit() -> Self {
        Self::new(
            Pose::VISIBLE,
            Pose::EXITED,
            Duration::from_millis(300),
            Easing::EaseIn,
        )
    }

    /// Section reveal: rises 20px while fading in over 0.6s.
    pub fn fade_in() -> Self {
        Self::new(
            Pose::BELOW,
            Pose::VISIBLE,
            Duration::from_millis(600),
            Easing::EaseOut,
        )
    }

    /// List item reveal: rises 20px while fading in over 0.5s.
    pub fn item_fade_in() -> Self {
        Self::new(
            Pose::BELOW,
            Pose::VISIBLE,
            Duration::from_millis(500),
            Easing::EaseInOut,
        )
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Same transition, starting from `pose` instead of its declared origin.
    pub fn starting_at(mut self, pose: Pose) -> Self {
        self.from = pose;
        self
    }

    /// Total time until the transition has settled on `to`.
    pub fn total(&self) -> Duration {
        self.delay + self.duration
    }

    pub fn is_complete(&self, elapsed: Duration) -> bool {
        elapsed >= self.total()
    }

    /// Normalized, eased progress at `elapsed`.
    pub fn progress(&self, elapsed: Duration) -> f32 {
        let Some(active) = elapsed.checked_sub(self.delay) else {
            return 0.0;
        };
        if self.duration.is_zero() {
            return 1.0;
        }
        let t = active.as_secs_f32() / self.duration.as_secs_f32();
        self.easing.apply(t)
    }

    /// Pose at `elapsed` since the transition started.
    pub fn sample(&self, elapsed: Duration) -> Pose {
        if self.is_complete(elapsed) {
            return self.to;
        }
        self.from.lerp(self.to, self.progress(elapsed))
    }
}
