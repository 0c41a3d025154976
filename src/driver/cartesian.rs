//! Cartesian stepper kinematics.
//!
//! Each axis is a linear stepper following one coordinate at a fixed
//! steps/mm ratio. Steps fall on integer step boundaries of that coordinate.

use heapless::Vec;
use libm::{ceilf, fabsf, floorf, roundf};

use crate::config::{AxisConfig, Coordinate, MachineConfig, MAX_AXES};
use crate::motion::StepDirection;

use super::{Driver, MotionContext, NextStep, Temperatures};

/// Fraction of a step within which a position counts as on a boundary.
/// The target may also fall this far short of a boundary and still have it
/// stepped.
const BOUNDARY_TOLERANCE: f32 = 1e-2;

/// One linear stepper.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepperAxis {
    coordinate: Coordinate,
    steps_per_mm: f32,
}

impl StepperAxis {
    /// Create an axis following `coordinate`.
    pub const fn new(coordinate: Coordinate, steps_per_mm: f32) -> Self {
        Self {
            coordinate,
            steps_per_mm,
        }
    }

    /// Build from configuration.
    pub fn from_config(config: &AxisConfig) -> Self {
        Self::new(config.coordinate, config.steps_per_mm)
    }

    /// Coordinate this axis follows.
    #[inline]
    pub fn coordinate(&self) -> Coordinate {
        self.coordinate
    }

    /// Steps per primitive unit.
    #[inline]
    pub fn steps_per_mm(&self) -> f32 {
        self.steps_per_mm
    }

    /// Next step boundary crossing for this axis.
    pub fn next_step(&self, ctx: &MotionContext) -> Option<NextStep> {
        let c = self.coordinate.index();
        let v = ctx.velocity[c];
        if v == 0.0 || !v.is_finite() {
            return None;
        }

        let spm = self.steps_per_mm;
        let raw = ctx.position[c] * spm;
        let nearest = roundf(raw);
        let here = if fabsf(raw - nearest) < BOUNDARY_TOLERANCE {
            nearest
        } else {
            raw
        };
        let forward = v > 0.0;

        // After a step the axis sits on a boundary; before the first step it
        // may sit anywhere between two.
        let boundary = match (ctx.last_step, forward) {
            (Some(_), true) => roundf(here) + 1.0,
            (Some(_), false) => roundf(here) - 1.0,
            (None, true) => floorf(here) + 1.0,
            (None, false) => ceilf(here) - 1.0,
        };

        let end = ctx.target[c] * spm;
        let overshoot = if forward { boundary - end } else { end - boundary };
        if overshoot > BOUNDARY_TOLERANCE {
            return None;
        }

        let time = (boundary / spm - ctx.start[c]) / v;
        Some(NextStep {
            time: time.max(0.0),
            direction: StepDirection::from_sign(v),
        })
    }
}

/// Reference driver: one [`StepperAxis`] per configured axis.
#[derive(Debug, Clone, Default)]
pub struct CartesianDriver {
    axes: Vec<StepperAxis, MAX_AXES>,
    temperatures: Temperatures,
}

impl CartesianDriver {
    /// Create a driver with no axes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build one stepper per `[[axes]]` entry, in order.
    pub fn from_config(config: &MachineConfig) -> Self {
        let axes = config.axes.iter().map(StepperAxis::from_config).collect();
        Self {
            axes,
            temperatures: Temperatures::unavailable(),
        }
    }

    /// Add an axis. Returns it back if `MAX_AXES` are already present.
    pub fn with_axis(mut self, axis: StepperAxis) -> core::result::Result<Self, StepperAxis> {
        self.axes.push(axis)?;
        Ok(self)
    }

    /// Axis at `index`.
    pub fn axis(&self, index: usize) -> Option<&StepperAxis> {
        self.axes.get(index)
    }

    /// Record new heater readings.
    pub fn set_temperatures(&mut self, temperatures: Temperatures) {
        self.temperatures = temperatures;
    }
}

impl Driver for CartesianDriver {
    fn num_axis(&self) -> usize {
        self.axes.len()
    }

    fn next_step(&self, axis: usize, ctx: &MotionContext) -> Option<NextStep> {
        self.axes.get(axis).and_then(|a| a.next_step(ctx))
    }

    fn temperature(&self) -> Temperatures {
        self.temperatures
    }
}
