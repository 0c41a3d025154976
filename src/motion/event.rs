//! Step events produced by the quantizer.

/// Direction of a single step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StepDirection {
    /// Towards increasing coordinate.
    #[default]
    Forward,
    /// Towards decreasing coordinate.
    Backward,
}

impl StepDirection {
    /// Get direction from a signed velocity or displacement.
    #[inline]
    pub fn from_sign(value: f32) -> Self {
        if value >= 0.0 {
            StepDirection::Forward
        } else {
            StepDirection::Backward
        }
    }

    /// Get the sign multiplier.
    #[inline]
    pub fn sign(self) -> i64 {
        match self {
            StepDirection::Forward => 1,
            StepDirection::Backward => -1,
        }
    }
}

/// One step of one axis, timed relative to the start of its move.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepEvent {
    /// Seconds since the move started.
    pub time: f32,
    /// Driver axis index.
    pub axis: usize,
    /// Step direction.
    pub direction: StepDirection,
}

impl StepEvent {
    /// Create a step event.
    #[inline]
    pub const fn new(time: f32, axis: usize, direction: StepDirection) -> Self {
        Self {
            time,
            axis,
            direction,
        }
    }
}
