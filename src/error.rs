//! Error types for gcode-stepper.
//!
//! Provides unified error handling across configuration, command dispatch and
//! motion quantization.

use core::fmt;

/// Result type alias using the library's Error type.
pub type Result<T> = core::result::Result<T, Error>;

/// Unified error type for all gcode-stepper operations.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Configuration parsing or validation error
    Config(ConfigError),
    /// Command parsing or dispatch error
    Command(CommandError),
    /// Motion quantization error
    Motion(MotionError),
    /// Output stage error
    Output(OutputError),
}

/// Configuration-related errors.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Failed to parse TOML configuration
    ParseError(heapless::String<128>),
    /// Steps per millimetre must be finite and > 0
    InvalidStepsPerMm {
        /// Axis name
        axis: heapless::String<16>,
        /// Offending value
        value: f32,
    },
    /// A default rate must be finite and > 0
    InvalidRate(f32),
    /// A coordinate scale factor must be finite and > 0
    InvalidScale(f32),
    /// Two axes share a name
    DuplicateAxisName(heapless::String<16>),
    /// File I/O error (std only)
    #[cfg(feature = "std")]
    IoError(heapless::String<128>),
}

/// Command parsing and dispatch errors.
///
/// A command that fails with one of these leaves the machine state untouched.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandError {
    /// Line contained no opcode
    Empty,
    /// Opcode or parameter word could not be parsed
    MalformedWord(heapless::String<16>),
    /// No handler exists for this opcode
    UnrecognizedOpcode(heapless::String<16>),
    /// Parameter value is NaN or infinite
    InvalidParameter {
        /// Parameter letter
        letter: char,
        /// Offending value
        value: f32,
    },
    /// Feed rate must be > 0
    InvalidFeedRate(f32),
}

/// Motion quantization errors.
#[derive(Debug, Clone, PartialEq)]
pub enum MotionError {
    /// Driver exposes more axes than the quantizer can track
    TooManyAxes {
        /// Axes reported by the driver
        requested: usize,
        /// Maximum supported axes
        max: usize,
    },
}

/// Output stage errors.
#[derive(Debug, Clone, PartialEq)]
pub enum OutputError {
    /// Pin operation failed
    PinError,
    /// Event addressed an axis with no pins attached
    UnknownAxis(usize),
    /// All `MAX_AXES` pin slots are in use
    TooManyAxes,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(e) => write!(f, "Configuration error: {}", e),
            Error::Command(e) => write!(f, "Command error: {}", e),
            Error::Motion(e) => write!(f, "Motion error: {}", e),
            Error::Output(e) => write!(f, "Output error: {}", e),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            ConfigError::InvalidStepsPerMm { axis, value } => {
                write!(f, "Invalid steps_per_mm {} for axis '{}'. Must be > 0", value, axis)
            }
            ConfigError::InvalidRate(v) => write!(f, "Invalid rate: {}. Must be > 0", v),
            ConfigError::InvalidScale(v) => write!(f, "Invalid scale: {}. Must be > 0", v),
            ConfigError::DuplicateAxisName(name) => write!(f, "Duplicate axis name: '{}'", name),
            #[cfg(feature = "std")]
            ConfigError::IoError(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandError::Empty => write!(f, "Empty command"),
            CommandError::MalformedWord(word) => write!(f, "Malformed word '{}'", word),
            CommandError::UnrecognizedOpcode(op) => {
                write!(f, "Unsupported opcode '{}'", op)
            }
            CommandError::InvalidParameter { letter, value } => {
                write!(f, "Parameter {} has non-finite value {}", letter, value)
            }
            CommandError::InvalidFeedRate(v) => write!(f, "Invalid feed rate {}. Must be > 0", v),
        }
    }
}

impl fmt::Display for MotionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MotionError::TooManyAxes { requested, max } => {
                write!(f, "Driver exposes {} axes, maximum is {}", requested, max)
            }
        }
    }
}

impl fmt::Display for OutputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputError::PinError => write!(f, "GPIO pin operation failed"),
            OutputError::UnknownAxis(axis) => write!(f, "No pins attached to axis {}", axis),
            OutputError::TooManyAxes => write!(f, "All output axis slots are in use"),
        }
    }
}

// Conversion impls
impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<CommandError> for Error {
    fn from(e: CommandError) -> Self {
        Error::Command(e)
    }
}

impl From<MotionError> for Error {
    fn from(e: MotionError) -> Self {
        Error::Motion(e)
    }
}

impl From<OutputError> for Error {
    fn from(e: OutputError) -> Self {
        Error::Output(e)
    }
}

/// Truncate `s` into a fixed-capacity string, keeping as much as fits.
pub(crate) fn truncated<const N: usize>(s: &str) -> heapless::String<N> {
    let mut out = heapless::String::new();
    for ch in s.chars() {
        if out.push(ch).is_err() {
            break;
        }
    }
    out
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

#[cfg(feature = "std")]
impl std::error::Error for CommandError {}

#[cfg(feature = "std")]
impl std::error::Error for MotionError {}

#[cfg(feature = "std")]
impl std::error::Error for OutputError {}
