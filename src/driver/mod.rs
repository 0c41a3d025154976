//! Driver capability interface.
//!
//! The quantizer and interpreter only see a [`Driver`]: how many axes exist,
//! when each axis takes its next step, and what the heaters read. Concrete
//! kinematics and hardware live behind it.

mod cartesian;
mod output;

pub use cartesian::{CartesianDriver, StepperAxis};
pub use output::{AxisPins, PinOutput};

use crate::motion::StepDirection;

/// Temperature reported when no sensor reading exists.
///
/// Anything below absolute zero is impossible, so the value cannot be confused
/// with a real reading.
pub const UNAVAILABLE_TEMPERATURE: i32 = -300;

/// Lowest physically possible reading, whole degrees Celsius.
pub const ABSOLUTE_ZERO: i32 = -273;

/// Heater readings in whole degrees Celsius.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Temperatures {
    /// Hotend temperature.
    pub hotend: i32,
    /// Heated bed temperature.
    pub bed: i32,
}

impl Temperatures {
    /// Create a reading.
    #[inline]
    pub const fn new(hotend: i32, bed: i32) -> Self {
        Self { hotend, bed }
    }

    /// Both sensors unavailable.
    #[inline]
    pub const fn unavailable() -> Self {
        Self::new(UNAVAILABLE_TEMPERATURE, UNAVAILABLE_TEMPERATURE)
    }

    /// True when the hotend reading is real. Anything below absolute zero
    /// means no reading.
    #[inline]
    pub fn hotend_available(&self) -> bool {
        self.hotend >= ABSOLUTE_ZERO
    }

    /// True when the bed reading is real.
    #[inline]
    pub fn bed_available(&self) -> bool {
        self.bed >= ABSOLUTE_ZERO
    }
}

impl Default for Temperatures {
    fn default() -> Self {
        Self::unavailable()
    }
}

/// Kinematic state handed to [`Driver::next_step`].
///
/// All arrays are indexed `[x, y, z, e]` in primitive units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionContext {
    /// Position at the start of the move.
    pub start: [f32; 4],
    /// Commanded end of the move.
    pub target: [f32; 4],
    /// Interpolated position at `last_step` (equals `start` before the first step).
    pub position: [f32; 4],
    /// Signed velocity per coordinate, primitive units per second.
    pub velocity: [f32; 4],
    /// Move-relative time of this axis's previous step, if it has stepped.
    pub last_step: Option<f32>,
    /// Direction of this axis's previous step.
    pub direction: StepDirection,
}

impl MotionContext {
    /// Seconds since move start of the axis's previous step, or zero.
    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.last_step.unwrap_or(0.0)
    }
}

/// When an axis steps next.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NextStep {
    /// Seconds since move start.
    pub time: f32,
    /// Direction of the step.
    pub direction: StepDirection,
}

/// Capability surface the motion core depends on.
pub trait Driver {
    /// Number of independently addressable axes.
    fn num_axis(&self) -> usize;

    /// Time and direction of the next step of `axis`, or `None` if the axis
    /// takes no further step in this move.
    ///
    /// Returned times must be later than `ctx.last_step`.
    fn next_step(&self, axis: usize, ctx: &MotionContext) -> Option<NextStep>;

    /// Current heater readings.
    fn temperature(&self) -> Temperatures {
        Temperatures::unavailable()
    }
}

impl<D: Driver + ?Sized> Driver for &D {
    fn num_axis(&self) -> usize {
        (**self).num_axis()
    }

    fn next_step(&self, axis: usize, ctx: &MotionContext) -> Option<NextStep> {
        (**self).next_step(axis, ctx)
    }

    fn temperature(&self) -> Temperatures {
        (**self).temperature()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unavailable_sentinel() {
        let t = Temperatures::unavailable();
        assert!(!t.hotend_available());
        assert!(!t.bed_available());
        assert!(Temperatures::new(205, 0).hotend_available());
        assert!(Temperatures::new(ABSOLUTE_ZERO, 0).hotend_available());

        let below = Temperatures::new(-280, -274);
        assert!(!below.hotend_available());
        assert!(!below.bed_available());
    }
}
