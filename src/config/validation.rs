//! Configuration validation.

use crate::error::{ConfigError, Error, Result};

use super::{AxisConfig, MachineConfig};

/// Validate a machine configuration.
///
/// Checks:
/// - Default move and feed rates are finite and positive
/// - Coordinate scale factors are finite and positive
/// - Every axis has a finite, positive steps/mm ratio
/// - Axis names are unique
pub fn validate_config(config: &MachineConfig) -> Result<()> {
    for rate in [config.motion.default_move_rate, config.motion.default_feed_rate] {
        if !is_positive(rate) {
            return Err(Error::Config(ConfigError::InvalidRate(rate)));
        }
    }

    for scale in config.units.scales() {
        if !is_positive(scale) {
            return Err(Error::Config(ConfigError::InvalidScale(scale)));
        }
    }

    for (i, axis) in config.axes.iter().enumerate() {
        validate_axis(axis)?;

        if config.axes[..i].iter().any(|a| a.name == axis.name) {
            return Err(Error::Config(ConfigError::DuplicateAxisName(axis.name.clone())));
        }
    }

    Ok(())
}

fn validate_axis(axis: &AxisConfig) -> Result<()> {
    if !is_positive(axis.steps_per_mm) {
        return Err(Error::Config(ConfigError::InvalidStepsPerMm {
            axis: axis.name.clone(),
            value: axis.steps_per_mm,
        }));
    }
    Ok(())
}

#[inline]
fn is_positive(v: f32) -> bool {
    v.is_finite() && v > 0.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Coordinate;

    #[test]
    fn test_default_printer_is_valid() {
        assert!(validate_config(&MachineConfig::cartesian_printer()).is_ok());
    }

    #[test]
    fn test_invalid_steps_per_mm() {
        let axis = AxisConfig::new("x", Coordinate::X, 0.0);
        let result = validate_axis(&axis);
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::InvalidStepsPerMm { .. }))
        ));
    }

    #[test]
    fn test_duplicate_axis_name() {
        let mut config = MachineConfig::cartesian_printer();
        config.axes[1].name = config.axes[0].name.clone();
        assert!(matches!(
            validate_config(&config),
            Err(Error::Config(ConfigError::DuplicateAxisName(_)))
        ));
    }

    #[test]
    fn test_nan_rate_rejected() {
        let mut config = MachineConfig::default();
        config.motion.default_feed_rate = f32::NAN;
        assert!(matches!(
            validate_config(&config),
            Err(Error::Config(ConfigError::InvalidRate(_)))
        ));
    }
}
