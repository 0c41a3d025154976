//! Configuration module for gcode-stepper.
//!
//! Provides types for loading and validating machine configuration
//! from TOML files (with `std` feature) or pre-parsed data.

mod axis;
mod machine;
pub mod units;
#[cfg(feature = "std")]
mod loader;
mod validation;

pub use axis::{AxisConfig, MAX_AXES};
pub use machine::{LoggingSettings, MachineConfig, MotionSettings, UnitSettings};
pub use validation::validate_config;

#[cfg(feature = "std")]
pub use loader::{load_config, parse_config};

// Re-export unit types at config level
pub use units::{Coordinate, LengthUnit, PositionMode, MM_PER_INCH};
