//! G-code module for gcode-stepper.
//!
//! Parses command lines, maps coordinates to primitive units and executes
//! commands against the machine state.

mod command;
mod convert;
mod opcode;
mod response;
mod state;

pub use command::Command;
pub use convert::UnitConverter;
pub use opcode::Opcode;
pub use response::Response;
pub use state::{MachineState, State};
