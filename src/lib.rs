//! # gcode-stepper
//!
//! G-code command interpreter and step-event quantizer for 3D printer firmware.
//!
//! ## Features
//!
//! - **Command interpreter**: modal G-code state (units, positioning, feed rates)
//!   with typed errors that never corrupt the session
//! - **Movement quantizer**: constant-velocity linear moves turned into
//!   time-ordered per-axis step events
//! - **Scheduler**: unbounded FIFO on a microsecond timebase with a drain
//!   interface for the real-time output stage
//! - **Driver capability trait**: kinematics and heaters behind one seam
//! - **embedded-hal 1.0 output stage**: STEP/DIR pulses from the scheduler
//! - **no_std compatible**: core library needs only `alloc`
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use gcode_stepper::{CartesianDriver, LogContext, MachineConfig, State};
//!
//! let config = gcode_stepper::load_config("printer.toml")?;
//! let log = LogContext::from_config(&config);
//! let driver = CartesianDriver::from_config(&config);
//! let mut state = State::new(&config, log);
//!
//! state.execute_line("G21", &driver)?;
//! state.execute_line("G1 X10 Y20 F1500", &driver)?;
//!
//! // Hand the queued events to the output stage
//! output.run(state.scheduler_mut())?;
//! ```
//!
//! ## Feature Flags
//!
//! - `std` (default): Enables file I/O, TOML parsing and the `std` clock

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]
// Allow large error types - necessary for no_std with heapless strings
#![allow(clippy::result_large_err)]

extern crate alloc;

// Core modules
pub mod config;
pub mod driver;
pub mod error;
pub mod gcode;
pub mod log;
pub mod motion;
pub mod timer;

// Re-exports for ergonomic API
pub use config::{validate_config, AxisConfig, MachineConfig, MAX_AXES};
pub use driver::{
    CartesianDriver, Driver, PinOutput, Temperatures, ABSOLUTE_ZERO, UNAVAILABLE_TEMPERATURE,
};
pub use error::{Error, Result};
pub use gcode::{Command, MachineState, Opcode, Response, State, UnitConverter};
pub use log::{LogContext, Verbosity};
pub use motion::{
    EventSink, LinearMove, Quantizer, Scheduler, StepDirection, StepEvent, StepSource,
    TerminationPolicy,
};
pub use timer::{Clock, IntervalTimer};
#[cfg(feature = "std")]
pub use timer::StdClock;

// Configuration loading (std only)
#[cfg(feature = "std")]
pub use config::{load_config, parse_config};

// Unit types
pub use config::units::{Coordinate, LengthUnit, PositionMode};
