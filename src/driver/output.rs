//! Pin-level output stage.
//!
//! Drains a [`StepSource`] and turns each event into a STEP pulse on
//! embedded-hal 1.0 pins, waiting out the inter-event delay with `DelayNs`.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use heapless::Vec;

use crate::config::MAX_AXES;
use crate::error::{OutputError, Result};
use crate::log::{log_debug, log_error, LogContext};
use crate::motion::{ScheduledEvent, StepDirection, StepSource};

/// Pulse width used when none is configured, in microseconds.
const DEFAULT_PULSE_US: u32 = 2;

/// STEP/DIR pin pair of one axis.
pub struct AxisPins<STEP, DIR>
where
    STEP: OutputPin,
    DIR: OutputPin,
{
    /// STEP pin (pulse to move one step).
    pub step: STEP,

    /// DIR pin (high = forward, or inverted).
    pub dir: DIR,

    /// Whether direction pin logic is inverted.
    pub invert_direction: bool,

    /// Current direction (cached to avoid unnecessary pin writes).
    current_direction: Option<StepDirection>,
}

impl<STEP, DIR> AxisPins<STEP, DIR>
where
    STEP: OutputPin,
    DIR: OutputPin,
{
    /// Create a pin pair.
    pub fn new(step: STEP, dir: DIR, invert_direction: bool) -> Self {
        Self {
            step,
            dir,
            invert_direction,
            current_direction: None,
        }
    }

    fn set_direction(&mut self, direction: StepDirection) -> Result<()> {
        if self.current_direction == Some(direction) {
            return Ok(());
        }

        let pin_high = match direction {
            StepDirection::Forward => !self.invert_direction,
            StepDirection::Backward => self.invert_direction,
        };

        if pin_high {
            self.dir.set_high().map_err(|_| OutputError::PinError)?;
        } else {
            self.dir.set_low().map_err(|_| OutputError::PinError)?;
        }

        self.current_direction = Some(direction);
        Ok(())
    }
}

/// Blocking output stage over embedded-hal pins.
pub struct PinOutput<STEP, DIR, DELAY>
where
    STEP: OutputPin,
    DIR: OutputPin,
    DELAY: DelayNs,
{
    axes: Vec<AxisPins<STEP, DIR>, MAX_AXES>,
    delay: DELAY,
    pulse_us: u32,
    /// Pulse time not yet deducted from a following delay.
    spent_us: u64,
    /// Position in steps per axis.
    positions: [i64; MAX_AXES],
    log: LogContext,
}

impl<STEP, DIR, DELAY> PinOutput<STEP, DIR, DELAY>
where
    STEP: OutputPin,
    DIR: OutputPin,
    DELAY: DelayNs,
{
    /// Create an output stage with no axes attached.
    pub fn new(delay: DELAY, log: LogContext) -> Self {
        Self {
            axes: Vec::new(),
            delay,
            pulse_us: DEFAULT_PULSE_US,
            spent_us: 0,
            positions: [0; MAX_AXES],
            log,
        }
    }

    /// Set the STEP pulse width.
    pub fn with_pulse_width_us(mut self, pulse_us: u32) -> Self {
        self.pulse_us = pulse_us;
        self
    }

    /// Attach the pins of the next axis index. Returns that index.
    ///
    /// # Errors
    ///
    /// Returns `OutputError::TooManyAxes` when `MAX_AXES` axes are attached.
    pub fn attach(&mut self, pins: AxisPins<STEP, DIR>) -> Result<usize> {
        self.axes
            .push(pins)
            .map_err(|_| OutputError::TooManyAxes)?;
        Ok(self.axes.len() - 1)
    }

    /// Number of attached axes.
    #[inline]
    pub fn num_axes(&self) -> usize {
        self.axes.len()
    }

    /// Net steps emitted on `axis` since creation.
    pub fn position(&self, axis: usize) -> Option<i64> {
        (axis < self.axes.len()).then(|| self.positions[axis])
    }

    /// Emit one event without waiting for its delay.
    ///
    /// # Errors
    ///
    /// Returns an error if the axis has no pins or a pin write fails.
    pub fn emit(&mut self, event: &ScheduledEvent) -> Result<()> {
        let pins = self
            .axes
            .get_mut(event.axis)
            .ok_or(OutputError::UnknownAxis(event.axis))?;

        pins.set_direction(event.direction)?;

        pins.step.set_high().map_err(|_| OutputError::PinError)?;
        self.delay.delay_us(self.pulse_us);
        pins.step.set_low().map_err(|_| OutputError::PinError)?;

        self.positions[event.axis] += event.direction.sign();
        self.spent_us += u64::from(self.pulse_us);
        Ok(())
    }

    /// Drain `source` to empty, honouring each event's delay.
    ///
    /// Returns the number of events emitted.
    ///
    /// # Errors
    ///
    /// Stops at the first failing event and returns its error. Events already
    /// emitted stay emitted.
    pub fn run<S: StepSource + ?Sized>(&mut self, source: &mut S) -> Result<usize> {
        let mut emitted = 0;
        while let Some(event) = source.pop_event() {
            self.wait(event.delay_us);
            if let Err(e) = self.emit(&event) {
                log_error!(self.log, "output stage stopped after {} events: {}", emitted, e);
                return Err(e);
            }
            emitted += 1;
        }
        log_debug!(self.log, "output stage emitted {} events", emitted);
        Ok(emitted)
    }

    /// Give the pins and delay back.
    pub fn release(self) -> (Vec<AxisPins<STEP, DIR>, MAX_AXES>, DELAY) {
        (self.axes, self.delay)
    }

    fn wait(&mut self, delay_us: u64) {
        // pulses already burned part of the delay; simultaneous events carry
        // the rest forward
        let mut remaining = delay_us.saturating_sub(self.spent_us);
        self.spent_us = self.spent_us.saturating_sub(delay_us);
        while remaining > 0 {
            let chunk = remaining.min(u64::from(u32::MAX)) as u32;
            self.delay.delay_us(chunk);
            remaining -= u64::from(chunk);
        }
    }
}
