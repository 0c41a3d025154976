//! Interval timer.
//!
//! Measures the time between successive observations. Every comparison also
//! records the current instant, so a task that calls [`IntervalTimer::clock_cmp`]
//! each time it runs learns whether it was serviced late.

use core::cmp::Ordering;
use core::time::Duration;

use super::Clock;

/// Self-resetting elapsed-time watchdog.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IntervalTimer {
    last: Option<Duration>,
}

impl IntervalTimer {
    /// Create a timer with no prior observation.
    pub const fn new() -> Self {
        Self { last: None }
    }

    /// Forget the last observation.
    pub fn reset(&mut self) {
        self.last = None;
    }

    /// Last observed instant, if any.
    #[inline]
    pub fn last(&self) -> Option<Duration> {
        self.last
    }

    /// Record the current instant and return it.
    pub fn clock<C: Clock + ?Sized>(&mut self, clock: &C) -> Duration {
        let now = clock.now();
        self.last = Some(now);
        now
    }

    /// Compare the time since the last observation against `threshold`.
    ///
    /// Returns `Greater` if more than `threshold` elapsed, `Less` if less,
    /// `Equal` if exactly `threshold`. With no prior observation returns
    /// `default`. Always records the current instant.
    pub fn clock_cmp<C: Clock + ?Sized>(
        &mut self,
        clock: &C,
        threshold: Duration,
        default: Ordering,
    ) -> Ordering {
        let now = clock.now();
        let result = match self.last {
            None => default,
            Some(last) => now.saturating_sub(last).cmp(&threshold),
        };
        self.last = Some(now);
        result
    }
}
