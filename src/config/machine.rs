//! Machine configuration - root configuration structure.

use heapless::Vec;
use serde::Deserialize;

use super::axis::{AxisConfig, MAX_AXES};
use super::units::{Coordinate, LengthUnit, PositionMode};
use crate::log::Verbosity;
use crate::motion::TerminationPolicy;

/// Root configuration structure from TOML.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MachineConfig {
    /// Motion defaults.
    #[serde(default)]
    pub motion: MotionSettings,

    /// Start-up unit and positioning modes plus coordinate scaling.
    #[serde(default)]
    pub units: UnitSettings,

    /// Logging verbosity.
    #[serde(default)]
    pub logging: LoggingSettings,

    /// Physical axes in driver index order.
    #[serde(default)]
    pub axes: Vec<AxisConfig, MAX_AXES>,
}

impl MachineConfig {
    /// Get an axis configuration by name.
    pub fn axis(&self, name: &str) -> Option<&AxisConfig> {
        self.axes.iter().find(|a| a.name.as_str() == name)
    }

    /// Driver index of the named axis.
    pub fn axis_index(&self, name: &str) -> Option<usize> {
        self.axes.iter().position(|a| a.name.as_str() == name)
    }

    /// List all axis names in index order.
    pub fn axis_names(&self) -> impl Iterator<Item = &str> {
        self.axes.iter().map(|a| a.name.as_str())
    }

    /// A four-axis cartesian printer with common belt/leadscrew ratios.
    pub fn cartesian_printer() -> Self {
        let mut axes = Vec::new();
        for axis in [
            AxisConfig::new("x", Coordinate::X, 80.0),
            AxisConfig::new("y", Coordinate::Y, 80.0),
            AxisConfig::new("z", Coordinate::Z, 400.0),
            AxisConfig::new("e", Coordinate::E, 93.0),
        ] {
            // capacity is MAX_AXES, four always fit
            let pushed = axes.push(axis).is_ok();
            debug_assert!(pushed);
        }
        Self {
            axes,
            ..Self::default()
        }
    }
}

/// Default rates and the termination policy for linear moves.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct MotionSettings {
    /// Cartesian speed in primitive units per second.
    #[serde(default = "default_move_rate")]
    pub default_move_rate: f32,

    /// Extrusion speed in primitive units per second until an `F` word arrives.
    #[serde(default = "default_feed_rate")]
    pub default_feed_rate: f32,

    /// Which axis group bounds the move duration.
    #[serde(default)]
    pub termination: TerminationPolicy,
}

fn default_move_rate() -> f32 {
    50.0
}

fn default_feed_rate() -> f32 {
    10.0
}

impl Default for MotionSettings {
    fn default() -> Self {
        Self {
            default_move_rate: default_move_rate(),
            default_feed_rate: default_feed_rate(),
            termination: TerminationPolicy::default(),
        }
    }
}

/// Start-up modes and per-coordinate primitive scale factors.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct UnitSettings {
    /// Length unit before any G20/G21.
    #[serde(default)]
    pub unit: LengthUnit,

    /// Positioning mode before any G90/G91.
    #[serde(default)]
    pub positioning: PositionMode,

    /// Primitive units per millimetre on X.
    #[serde(default = "unit_scale")]
    pub x_scale: f32,

    /// Primitive units per millimetre on Y.
    #[serde(default = "unit_scale")]
    pub y_scale: f32,

    /// Primitive units per millimetre on Z.
    #[serde(default = "unit_scale")]
    pub z_scale: f32,

    /// Primitive units per millimetre on E.
    #[serde(default = "unit_scale")]
    pub e_scale: f32,
}

fn unit_scale() -> f32 {
    1.0
}

impl UnitSettings {
    /// Scales in `[x, y, z, e]` order.
    pub fn scales(&self) -> [f32; 4] {
        [self.x_scale, self.y_scale, self.z_scale, self.e_scale]
    }
}

impl Default for UnitSettings {
    fn default() -> Self {
        Self {
            unit: LengthUnit::default(),
            positioning: PositionMode::default(),
            x_scale: 1.0,
            y_scale: 1.0,
            z_scale: 1.0,
            e_scale: 1.0,
        }
    }
}

/// Logging section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub struct LoggingSettings {
    /// Maximum verbosity emitted.
    #[serde(default)]
    pub verbosity: Verbosity,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cartesian_printer_layout() {
        let config = MachineConfig::cartesian_printer();
        let names: alloc::vec::Vec<_> = config.axis_names().collect();
        assert_eq!(names, ["x", "y", "z", "e"]);
        assert_eq!(config.axis_index("z"), Some(2));
        assert_eq!(config.axis("e").unwrap().coordinate, Coordinate::E);
    }

    #[test]
    fn test_default_scales() {
        assert_eq!(UnitSettings::default().scales(), [1.0; 4]);
    }
}
