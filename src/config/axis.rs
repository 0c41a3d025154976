//! Physical axis configuration from TOML.

use heapless::String;
use serde::Deserialize;

use super::units::Coordinate;

/// Maximum number of driver axes a machine may expose.
pub const MAX_AXES: usize = 8;

/// One physical actuator and the logical coordinate it follows.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AxisConfig {
    /// Human-readable name (max 16 chars).
    pub name: String<16>,

    /// Logical coordinate this actuator tracks.
    pub coordinate: Coordinate,

    /// Full or micro steps per primitive unit (millimetre).
    pub steps_per_mm: f32,

    /// Invert direction pin logic.
    #[serde(default)]
    pub invert_direction: bool,
}

impl AxisConfig {
    /// Create an axis configuration.
    pub fn new(name: &str, coordinate: Coordinate, steps_per_mm: f32) -> Self {
        Self {
            name: crate::error::truncated(name),
            coordinate,
            steps_per_mm,
            invert_direction: false,
        }
    }

    /// Primitive distance covered by one step.
    #[inline]
    pub fn mm_per_step(&self) -> f32 {
        1.0 / self.steps_per_mm
    }
}
