//! Periodic timer driven by host-supplied elapsed time.

use std::time::Duration;

use crate::error::{NebulaError, Result};

/// Fires every `interval` of accumulated time.
///
/// The timer never reads a clock. The host feeds it elapsed time with
/// [`IntervalTimer::poll`], and any remainder carries over to the next poll,
/// so periods do not drift however the time is sliced.
#[derive(Debug, Clone, PartialEq)]
pub struct IntervalTimer {
    interval: Duration,
    elapsed: Duration,
    active: bool,
}

impl IntervalTimer {
    /// Start a timer with the given period.
    pub fn new(interval: Duration) -> Result<Self> {
        validate_interval(interval)?;
        Ok(Self {
            interval,
            elapsed: Duration::ZERO,
            active: true,
        })
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Time accumulated toward the next firing.
    pub fn pending(&self) -> Duration {
        self.elapsed
    }

    /// Feed elapsed time; returns how many periods completed.
    pub fn poll(&mut self, dt: Duration) -> u32 {
        if !self.active {
            return 0;
        }
        self.elapsed += dt;
        let period = self.interval.as_nanos();
        let fires = self.elapsed.as_nanos() / period;
        if fires == 0 {
            return 0;
        }
        let consumed = fires * period;
        self.elapsed = Duration::from_nanos((self.elapsed.as_nanos() - consumed) as u64);
        u32::try_from(fires).unwrap_or(u32::MAX)
    }

    /// Drop any accumulated time and start a fresh period of `interval`.
    pub fn restart(&mut self, interval: Duration) -> Result<()> {
        validate_interval(interval)?;
        self.interval = interval;
        self.elapsed = Duration::ZERO;
        self.active = true;
        Ok(())
    }

    /// Stop firing until restarted.
    pub fn cancel(&mut self) {
        self.active = false;
        self.elapsed = Duration::ZERO;
    }
}

fn validate_interval(interval: Duration) -> Result<()> {
    if interval.is_zero() {
        return Err(NebulaError::invalid(
            "cycle.interval_ms",
            "must be greater than zero",
        ));
    }
    Ok(())
}
