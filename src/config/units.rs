//! Unit and mode types for user-facing coordinates.
//!
//! Provides the length units and positioning modes a G-code stream can select,
//! plus the four logical coordinates a motion command addresses.

use serde::Deserialize;

/// Millimetres per inch.
pub const MM_PER_INCH: f32 = 25.4;

/// Length unit used to interpret coordinate parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LengthUnit {
    /// Millimetres (G21).
    #[default]
    Millimeter,
    /// Inches (G20).
    Inch,
}

impl LengthUnit {
    /// Millimetres represented by one unit.
    #[inline]
    pub const fn mm_per_unit(self) -> f32 {
        match self {
            LengthUnit::Millimeter => 1.0,
            LengthUnit::Inch => MM_PER_INCH,
        }
    }
}

/// How coordinate parameters relate to the previous destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PositionMode {
    /// Coordinates are measured from the origin (G90).
    #[default]
    Absolute,
    /// Coordinates are offsets from the last destination (G91).
    Relative,
}

/// Logical coordinate addressed by a motion command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Coordinate {
    /// Cartesian X.
    X,
    /// Cartesian Y.
    Y,
    /// Cartesian Z.
    Z,
    /// Extruder filament position.
    E,
}

impl Coordinate {
    /// All coordinates in index order.
    pub const ALL: [Coordinate; 4] = [Coordinate::X, Coordinate::Y, Coordinate::Z, Coordinate::E];

    /// Index into `[x, y, z, e]` arrays.
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Coordinate::X => 0,
            Coordinate::Y => 1,
            Coordinate::Z => 2,
            Coordinate::E => 3,
        }
    }

    /// G-code parameter letter for this coordinate.
    #[inline]
    pub const fn letter(self) -> char {
        match self {
            Coordinate::X => 'X',
            Coordinate::Y => 'Y',
            Coordinate::Z => 'Z',
            Coordinate::E => 'E',
        }
    }

    /// True for X, Y and Z.
    #[inline]
    pub const fn is_cartesian(self) -> bool {
        !matches!(self, Coordinate::E)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inch_scale() {
        assert_eq!(LengthUnit::Inch.mm_per_unit(), 25.4);
        assert_eq!(LengthUnit::Millimeter.mm_per_unit(), 1.0);
    }

    #[test]
    fn test_coordinate_indices() {
        for (i, c) in Coordinate::ALL.iter().enumerate() {
            assert_eq!(c.index(), i);
        }
        assert!(!Coordinate::E.is_cartesian());
    }
}
