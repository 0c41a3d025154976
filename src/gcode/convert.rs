//! Unit conversion between G-code coordinates and primitive coordinates.
//!
//! Primitive coordinates are millimetres from the origin, multiplied by a
//! per-coordinate scale factor. They do not depend on the current unit or
//! positioning mode.

use crate::config::{Coordinate, LengthUnit, PositionMode};

/// Seconds per minute, for `F` words given per minute.
const SECS_PER_MIN: f32 = 60.0;

/// Pure conversions for one unit/positioning mode combination.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitConverter {
    unit: LengthUnit,
    positioning: PositionMode,
    scales: [f32; 4],
}

impl UnitConverter {
    /// Create a converter with unit scale on every coordinate.
    pub const fn new(unit: LengthUnit, positioning: PositionMode) -> Self {
        Self {
            unit,
            positioning,
            scales: [1.0; 4],
        }
    }

    /// Replace the per-coordinate scale factors (`[x, y, z, e]`).
    pub fn with_scales(mut self, scales: [f32; 4]) -> Self {
        self.scales = scales;
        self
    }

    /// Same scales with a different unit.
    pub fn with_unit(mut self, unit: LengthUnit) -> Self {
        self.unit = unit;
        self
    }

    /// Same scales with a different positioning mode.
    pub fn with_positioning(mut self, positioning: PositionMode) -> Self {
        self.positioning = positioning;
        self
    }

    /// Length unit.
    #[inline]
    pub fn unit(&self) -> LengthUnit {
        self.unit
    }

    /// Positioning mode.
    #[inline]
    pub fn positioning(&self) -> PositionMode {
        self.positioning
    }

    /// Convert a length in the current unit to millimetres.
    #[inline]
    pub fn unit_to_mm(&self, value: f32) -> f32 {
        value * self.unit.mm_per_unit()
    }

    /// Convert a displacement to primitive units. No positioning effect.
    #[inline]
    pub fn to_primitive(&self, coordinate: Coordinate, value: f32) -> f32 {
        self.unit_to_mm(value) * self.scales[coordinate.index()]
    }

    /// Inverse of [`UnitConverter::to_primitive`].
    #[inline]
    pub fn from_primitive(&self, coordinate: Coordinate, primitive: f32) -> f32 {
        primitive / self.scales[coordinate.index()] / self.unit.mm_per_unit()
    }

    /// Absolute primitive target for a coordinate word.
    ///
    /// In relative mode `value` is added to `dest`, the last accepted
    /// destination for that coordinate.
    pub fn to_absolute(&self, coordinate: Coordinate, value: f32, dest: f32) -> f32 {
        let primitive = self.to_primitive(coordinate, value);
        match self.positioning {
            PositionMode::Absolute => primitive,
            PositionMode::Relative => dest + primitive,
        }
    }

    /// Coordinate word that [`UnitConverter::to_absolute`] maps to `primitive`.
    pub fn from_absolute(&self, coordinate: Coordinate, primitive: f32, dest: f32) -> f32 {
        match self.positioning {
            PositionMode::Absolute => self.from_primitive(coordinate, primitive),
            PositionMode::Relative => self.from_primitive(coordinate, primitive - dest),
        }
    }

    /// Convert an `F` word (current unit per minute) to millimetres per second.
    #[inline]
    pub fn feed_to_primitive(&self, value: f32) -> f32 {
        self.unit_to_mm(value) / SECS_PER_MIN
    }
}

impl Default for UnitConverter {
    fn default() -> Self {
        Self::new(LengthUnit::Millimeter, PositionMode::Absolute)
    }
}
