//! Configuration loading from files (std only).

use std::fs;
use std::path::Path;

use crate::error::{truncated, ConfigError, Error, Result};

use super::MachineConfig;

/// Load configuration from a TOML file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
///
/// # Example
///
/// ```rust,ignore
/// use gcode_stepper::load_config;
///
/// let config = load_config("printer.toml")?;
/// ```
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<MachineConfig> {
    let content = fs::read_to_string(path.as_ref())
        .map_err(|e| Error::Config(ConfigError::IoError(truncated(&e.to_string()))))?;

    parse_config(&content)
}

/// Parse configuration from a TOML string.
///
/// # Errors
///
/// Returns an error if the TOML is invalid or fails validation.
pub fn parse_config(content: &str) -> Result<MachineConfig> {
    let config: MachineConfig = toml::from_str(content)
        .map_err(|e| Error::Config(ConfigError::ParseError(truncated(e.message()))))?;

    super::validation::validate_config(&config)?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Coordinate, LengthUnit};
    use crate::log::Verbosity;
    use crate::motion::TerminationPolicy;

    #[test]
    fn test_parse_empty_config_uses_defaults() {
        let config = parse_config("").unwrap();
        assert!(config.axes.is_empty());
        assert_eq!(config.motion.default_move_rate, 50.0);
        assert_eq!(config.motion.termination, TerminationPolicy::Shortest);
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
[motion]
default_move_rate = 120.0
default_feed_rate = 4.5
termination = "longest"

[units]
unit = "inch"
e_scale = 1.05

[logging]
verbosity = "debug"

[[axes]]
name = "x"
coordinate = "x"
steps_per_mm = 80.0

[[axes]]
name = "e"
coordinate = "e"
steps_per_mm = 93.0
invert_direction = true
"#;

        let config = parse_config(toml).unwrap();
        assert_eq!(config.motion.termination, TerminationPolicy::Longest);
        assert_eq!(config.units.unit, LengthUnit::Inch);
        assert!((config.units.e_scale - 1.05).abs() < 1e-6);
        assert_eq!(config.logging.verbosity, Verbosity::Debug);
        assert_eq!(config.axes.len(), 2);
        let e = config.axis("e").unwrap();
        assert_eq!(e.coordinate, Coordinate::E);
        assert!(e.invert_direction);
    }

    #[test]
    fn test_parse_rejects_zero_steps() {
        let toml = r#"
[[axes]]
name = "x"
coordinate = "x"
steps_per_mm = 0.0
"#;
        assert!(matches!(
            parse_config(toml),
            Err(Error::Config(ConfigError::InvalidStepsPerMm { .. }))
        ));
    }

    #[test]
    fn test_parse_error_reported() {
        let result = parse_config("[motion\n");
        assert!(matches!(result, Err(Error::Config(ConfigError::ParseError(_)))));
    }

    #[test]
    fn test_missing_file() {
        let result = load_config("/nonexistent/printer.toml");
        assert!(matches!(result, Err(Error::Config(ConfigError::IoError(_)))));
    }
}
