//! Motion module for gcode-stepper.
//!
//! Converts linear moves into time-ordered step events and queues them for
//! the real-time output stage.

mod event;
mod quantizer;
mod scheduler;

pub use event::{StepDirection, StepEvent};
pub use quantizer::{LinearMove, MovePlan, QuantizeSummary, Quantizer, TerminationPolicy};
pub use scheduler::{EventSink, ScheduledEvent, Scheduler, StepSource};
