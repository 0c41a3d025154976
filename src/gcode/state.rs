//! Command interpreter.
//!
//! [`State`] owns the persistent machine state and the step scheduler, and
//! executes one command at a time against a [`Driver`].
//!
//! The destination advances as soon as a move is accepted, long before the
//! queued steps have physically run. Callers that need the physical position
//! must track what the output stage has drained.

use crate::config::{Coordinate, LengthUnit, MachineConfig, PositionMode};
use crate::driver::Driver;
use crate::error::{truncated, CommandError, Result};
use crate::log::{log_debug, log_info, log_warn, LogContext};
use crate::motion::{LinearMove, Quantizer, Scheduler, StepSource};

use super::command::Command;
use super::convert::UnitConverter;
use super::opcode::Opcode;
use super::response::Response;

/// Persistent modal state of a machine session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MachineState {
    /// Length unit for coordinate and feed words.
    pub unit: LengthUnit,
    /// Positioning mode for X, Y, Z (and E unless overridden).
    pub positioning: PositionMode,
    /// Extruder positioning set by M82/M83; `None` follows `positioning`.
    pub extruder_positioning: Option<PositionMode>,
    /// Last accepted destination, `[x, y, z, e]` primitive.
    pub destination: [f32; 4],
    /// Cartesian speed, primitive units per second.
    pub move_rate: f32,
    /// Extrusion speed, primitive units per second.
    pub feed_rate: f32,
}

impl MachineState {
    /// Start-up state from configuration, at the origin.
    pub fn from_config(config: &MachineConfig) -> Self {
        Self {
            unit: config.units.unit,
            positioning: config.units.positioning,
            extruder_positioning: None,
            destination: [0.0; 4],
            move_rate: config.motion.default_move_rate,
            feed_rate: config.motion.default_feed_rate,
        }
    }

    /// Positioning mode in effect for E.
    #[inline]
    pub fn extruder_mode(&self) -> PositionMode {
        self.extruder_positioning.unwrap_or(self.positioning)
    }

    /// Last accepted destination of one coordinate.
    #[inline]
    pub fn destination(&self, c: Coordinate) -> f32 {
        self.destination[c.index()]
    }
}

/// G-code interpreter session.
#[derive(Debug, Clone)]
pub struct State {
    machine: MachineState,
    scales: [f32; 4],
    scheduler: Scheduler,
    quantizer: Quantizer,
    log: LogContext,
}

impl State {
    /// Create a session from configuration.
    pub fn new(config: &MachineConfig, log: LogContext) -> Self {
        let machine = MachineState::from_config(config);
        log_info!(
            log,
            "interpreter ready: {:?} {:?}, move rate {}, feed rate {}, {:?} termination",
            machine.unit,
            machine.positioning,
            machine.move_rate,
            machine.feed_rate,
            config.motion.termination
        );
        Self {
            machine,
            scales: config.units.scales(),
            scheduler: Scheduler::new(),
            quantizer: Quantizer::new(config.motion.termination, log),
            log,
        }
    }

    /// Current machine state.
    #[inline]
    pub fn machine(&self) -> &MachineState {
        &self.machine
    }

    /// Queued step events.
    #[inline]
    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    /// Queued step events, for the output stage to drain.
    #[inline]
    pub fn scheduler_mut(&mut self) -> &mut Scheduler {
        &mut self.scheduler
    }

    /// Number of step events waiting to be drained.
    #[inline]
    pub fn queue_depth(&self) -> usize {
        self.scheduler.depth()
    }

    /// Converter for X, Y and Z in the current modes.
    pub fn converter(&self) -> UnitConverter {
        UnitConverter::new(self.machine.unit, self.machine.positioning).with_scales(self.scales)
    }

    fn converter_for(&self, c: Coordinate) -> UnitConverter {
        let conv = self.converter();
        match c {
            Coordinate::E => conv.with_positioning(self.machine.extruder_mode()),
            _ => conv,
        }
    }

    /// Parse and execute one line.
    ///
    /// # Errors
    ///
    /// Returns parse errors from [`Command::parse`] and execution errors from
    /// [`State::execute`].
    pub fn execute_line<D: Driver + ?Sized>(&mut self, line: &str, driver: &D) -> Result<Response> {
        let cmd = Command::parse(line)?;
        self.execute(&cmd, driver)
    }

    /// Execute one command.
    ///
    /// A failing command leaves the machine state and scheduler unchanged.
    ///
    /// # Errors
    ///
    /// - `CommandError::UnrecognizedOpcode` for opcodes with no handler
    /// - `CommandError::InvalidParameter` for non-finite parameters
    /// - `CommandError::InvalidFeedRate` for `F` <= 0
    /// - `MotionError::TooManyAxes` if the driver has too many axes
    pub fn execute<D: Driver + ?Sized>(&mut self, cmd: &Command, driver: &D) -> Result<Response> {
        let Some(op) = Opcode::from_token(cmd.opcode()) else {
            log_warn!(self.log, "rejecting unsupported opcode {}", cmd.opcode());
            return Err(CommandError::UnrecognizedOpcode(truncated(cmd.opcode())).into());
        };
        log_debug!(self.log, "executing {} {:?}", op, cmd);

        match op {
            Opcode::RapidMove | Opcode::LinearMove => self.linear_move(cmd, driver),
            Opcode::UnitsInch => {
                self.machine.unit = LengthUnit::Inch;
                Ok(Response::Ok)
            }
            Opcode::UnitsMillimeter => {
                self.machine.unit = LengthUnit::Millimeter;
                Ok(Response::Ok)
            }
            Opcode::AbsolutePositioning => {
                self.machine.positioning = PositionMode::Absolute;
                Ok(Response::Ok)
            }
            Opcode::RelativePositioning => {
                self.machine.positioning = PositionMode::Relative;
                Ok(Response::Ok)
            }
            Opcode::ExtruderAbsolute => {
                self.machine.extruder_positioning = Some(PositionMode::Absolute);
                Ok(Response::Ok)
            }
            Opcode::ExtruderRelative => {
                self.machine.extruder_positioning = Some(PositionMode::Relative);
                Ok(Response::Ok)
            }
            Opcode::SetPosition => self.set_position(cmd),
            // nothing to initialize, line numbers are not tracked
            Opcode::InitStorage | Opcode::SetLineNumber => Ok(Response::Ok),
            Opcode::ReportTemperature => Ok(Response::temperature(driver.temperature())),
        }
    }

    fn linear_move<D: Driver + ?Sized>(&mut self, cmd: &Command, driver: &D) -> Result<Response> {
        check_finite(cmd)?;

        let start = self.machine.destination;
        let mut target = start;
        for c in Coordinate::ALL {
            if let Some(value) = cmd.coordinate(c) {
                let i = c.index();
                target[i] = self.converter_for(c).to_absolute(c, value, start[i]);
                if !target[i].is_finite() {
                    return Err(CommandError::InvalidParameter {
                        letter: c.letter(),
                        value,
                    }
                    .into());
                }
            }
        }

        let feed_rate = match cmd.f() {
            Some(f) => {
                let rate = self.converter().feed_to_primitive(f);
                if !(rate > 0.0 && rate.is_finite()) {
                    return Err(CommandError::InvalidFeedRate(f).into());
                }
                rate
            }
            None => self.machine.feed_rate,
        };

        let mv = LinearMove::new(start, target, self.machine.move_rate, feed_rate);
        let summary = self.quantizer.quantize(driver, &mv, &mut self.scheduler)?;

        self.machine.destination = target;
        self.machine.feed_rate = feed_rate;
        log_debug!(
            self.log,
            "queued move to {:?}: {} events over {}s, depth {}",
            target,
            summary.events,
            summary.duration,
            self.scheduler.depth()
        );

        Ok(Response::None)
    }

    /// G92: redefine the destination without moving. No words zeroes all.
    fn set_position(&mut self, cmd: &Command) -> Result<Response> {
        check_finite(cmd)?;

        let conv = self.converter();
        let mut destination = self.machine.destination;
        if cmd.has_coordinates() {
            for c in Coordinate::ALL {
                if let Some(value) = cmd.coordinate(c) {
                    destination[c.index()] = conv.to_primitive(c, value);
                }
            }
        } else {
            destination = [0.0; 4];
        }

        self.machine.destination = destination;
        Ok(Response::Ok)
    }
}

fn check_finite(cmd: &Command) -> Result<()> {
    match cmd.params().find(|(_, v)| !v.is_finite()) {
        Some((letter, value)) => Err(CommandError::InvalidParameter { letter, value }.into()),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::{CartesianDriver, MotionContext, NextStep, Temperatures};
    use crate::error::{Error, MotionError};

    fn session() -> (State, CartesianDriver) {
        let config = MachineConfig::cartesian_printer();
        (
            State::new(&config, LogContext::quiet()),
            CartesianDriver::from_config(&config),
        )
    }

    struct Wide;

    impl Driver for Wide {
        fn num_axis(&self) -> usize {
            crate::config::MAX_AXES + 1
        }

        fn next_step(&self, _axis: usize, _ctx: &MotionContext) -> Option<NextStep> {
            None
        }
    }

    #[test]
    fn test_mode_commands_reply_ok() {
        let (mut state, driver) = session();
        for line in ["G20", "G21", "G90", "G91", "M21", "M82", "M83", "M110 N0"] {
            assert_eq!(state.execute_line(line, &driver).unwrap(), Response::Ok, "{}", line);
        }
        assert_eq!(state.machine().extruder_mode(), PositionMode::Relative);
    }

    #[test]
    fn test_move_updates_destination_and_feed() {
        let (mut state, driver) = session();
        let r = state.execute_line("G1 X10 Y5 F600", &driver).unwrap();
        assert!(r.is_none());
        assert_eq!(state.machine().destination, [10.0, 5.0, 0.0, 0.0]);
        assert_eq!(state.machine().feed_rate, 10.0);
        assert!(state.queue_depth() > 0);
    }

    #[test]
    fn test_relative_moves_compose() {
        let (mut state, driver) = session();
        state.execute_line("G91", &driver).unwrap();
        state.execute_line("G1 X1", &driver).unwrap();
        state.execute_line("G1 X1 Y2", &driver).unwrap();
        assert_eq!(state.machine().destination, [2.0, 2.0, 0.0, 0.0]);
    }

    #[test]
    fn test_inch_move() {
        let (mut state, driver) = session();
        state.execute_line("G20", &driver).unwrap();
        state.execute_line("G1 Z1", &driver).unwrap();
        assert!((state.machine().destination(Coordinate::Z) - 25.4).abs() < 1e-5);
    }

    #[test]
    fn test_extruder_relative_while_absolute() {
        let (mut state, driver) = session();
        state.execute_line("M83", &driver).unwrap();
        state.execute_line("G1 E1", &driver).unwrap();
        state.execute_line("G1 E1", &driver).unwrap();
        assert_eq!(state.machine().destination(Coordinate::E), 2.0);
        assert_eq!(state.machine().positioning, PositionMode::Absolute);
    }

    #[test]
    fn test_set_position() {
        let (mut state, driver) = session();
        state.execute_line("G1 X10 Y10", &driver).unwrap();
        let depth = state.queue_depth();

        assert_eq!(state.execute_line("G92 X0", &driver).unwrap(), Response::Ok);
        assert_eq!(state.machine().destination, [0.0, 10.0, 0.0, 0.0]);
        assert_eq!(state.queue_depth(), depth);

        state.execute_line("G92", &driver).unwrap();
        assert_eq!(state.machine().destination, [0.0; 4]);
    }

    #[test]
    fn test_temperature_report() {
        let (mut state, mut driver) = session();
        driver.set_temperatures(Temperatures::new(205, 60));
        let r = state.execute_line("M105", &driver).unwrap();
        assert_eq!(r.as_str(), Some("ok T:205 B:60"));
    }

    #[test]
    fn test_invalid_feed_rate_rejected() {
        let (mut state, driver) = session();
        let before = *state.machine();
        let err = state.execute_line("G1 X5 F0", &driver).unwrap_err();
        assert_eq!(err, Error::Command(CommandError::InvalidFeedRate(0.0)));
        assert_eq!(*state.machine(), before);
        assert_eq!(state.queue_depth(), 0);
    }

    #[test]
    fn test_non_finite_parameter_rejected() {
        let (mut state, driver) = session();
        let err = state.execute_line("G1 XNaN", &driver).unwrap_err();
        assert!(matches!(
            err,
            Error::Command(CommandError::InvalidParameter { letter: 'X', .. })
        ));
        assert_eq!(state.machine().destination, [0.0; 4]);
    }

    #[test]
    fn test_too_many_axes_leaves_state() {
        let (mut state, _) = session();
        let err = state.execute_line("G1 X5", &Wide).unwrap_err();
        assert!(matches!(err, Error::Motion(MotionError::TooManyAxes { .. })));
        assert_eq!(state.machine().destination, [0.0; 4]);
    }
}
