//! Output stage tests against mocked embedded-hal pins.

use embedded_hal::delay::DelayNs;
use embedded_hal_mock::eh1::digital::{Mock as PinMock, State as PinState, Transaction as PinTransaction};

use gcode_stepper::config::Coordinate;
use gcode_stepper::driver::{AxisPins, StepperAxis};
use gcode_stepper::{CartesianDriver, LogContext, MachineConfig, PinOutput, State, StepSource};

/// Delay that only adds up what it was asked to wait.
#[derive(Default)]
struct RecordingDelay {
    total_ns: u64,
}

impl DelayNs for RecordingDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns += u64::from(ns);
    }
}

fn pulses(n: usize) -> Vec<PinTransaction> {
    (0..n)
        .flat_map(|_| {
            [
                PinTransaction::set(PinState::High),
                PinTransaction::set(PinState::Low),
            ]
        })
        .collect()
}

fn x_only() -> CartesianDriver {
    CartesianDriver::new()
        .with_axis(StepperAxis::new(Coordinate::X, 10.0))
        .unwrap()
}

#[test]
fn test_session_drives_pins() {
    let driver = x_only();
    let mut state = State::new(&MachineConfig::default(), LogContext::quiet());
    state.execute_line("G1 X0.3", &driver).unwrap();
    state.execute_line("G1 X0.1", &driver).unwrap();
    assert_eq!(state.queue_depth(), 5);
    assert_eq!(state.scheduler().horizon_us(), 10_000);

    let step = PinMock::new(&pulses(5));
    let dir = PinMock::new(&[
        PinTransaction::set(PinState::High),
        PinTransaction::set(PinState::Low),
    ]);

    let mut output = PinOutput::new(RecordingDelay::default(), LogContext::quiet());
    output.attach(AxisPins::new(step, dir, false)).unwrap();

    let emitted = output.run(state.scheduler_mut()).unwrap();
    assert_eq!(emitted, 5);
    assert_eq!(output.position(0), Some(1));
    assert_eq!(state.scheduler().depth(), 0);

    let (mut axes, delay) = output.release();
    // waits span the whole queue plus the final pulse
    assert!(delay.total_ns >= 10_000_000);
    assert!(delay.total_ns <= 10_010_000);

    for pins in axes.iter_mut() {
        pins.step.done();
        pins.dir.done();
    }
}

#[test]
fn test_simultaneous_steps_do_not_drift() {
    let driver = CartesianDriver::new()
        .with_axis(StepperAxis::new(Coordinate::X, 10.0))
        .and_then(|d| d.with_axis(StepperAxis::new(Coordinate::Y, 10.0)))
        .unwrap();
    let mut state = State::new(&MachineConfig::default(), LogContext::quiet());
    state.execute_line("G1 X10 Y10", &driver).unwrap();

    let events: Vec<_> = state.scheduler().iter().copied().collect();
    assert_eq!(events.len(), 200);
    assert!(events.iter().filter(|e| e.delay_us == 0).count() >= 99);
    let last_fire_us = events.last().map(|e| e.fire_time_us).unwrap();

    let step = PinMock::new(&pulses(100));
    let dir = PinMock::new(&[PinTransaction::set(PinState::High)]);
    let step_y = PinMock::new(&pulses(100));
    let dir_y = PinMock::new(&[PinTransaction::set(PinState::High)]);

    let pulse_us = 2;
    let mut output = PinOutput::new(RecordingDelay::default(), LogContext::quiet())
        .with_pulse_width_us(pulse_us);
    output.attach(AxisPins::new(step, dir, false)).unwrap();
    output.attach(AxisPins::new(step_y, dir_y, false)).unwrap();
    output.run(state.scheduler_mut()).unwrap();
    assert_eq!(output.position(0), Some(100));
    assert_eq!(output.position(1), Some(100));

    let (mut axes, delay) = output.release();
    let elapsed_us = delay.total_ns / 1000;
    // only the closing pair of simultaneous pulses may run past the last fire time
    assert!(elapsed_us >= last_fire_us);
    assert!(elapsed_us <= last_fire_us + 2 * u64::from(pulse_us));

    for pins in axes.iter_mut() {
        pins.step.done();
        pins.dir.done();
    }
}

#[test]
fn test_inverted_direction_pin() {
    let driver = x_only();
    let mut state = State::new(&MachineConfig::default(), LogContext::quiet());
    state.execute_line("G1 X0.2", &driver).unwrap();

    let step = PinMock::new(&pulses(2));
    let dir = PinMock::new(&[PinTransaction::set(PinState::Low)]);

    let mut output = PinOutput::new(RecordingDelay::default(), LogContext::quiet())
        .with_pulse_width_us(5);
    output.attach(AxisPins::new(step, dir, true)).unwrap();
    output.run(state.scheduler_mut()).unwrap();

    let (mut axes, _) = output.release();
    axes[0].step.done();
    axes[0].dir.done();
}

#[test]
fn test_unknown_axis_stops_drain() {
    let driver = CartesianDriver::new()
        .with_axis(StepperAxis::new(Coordinate::X, 10.0))
        .and_then(|d| d.with_axis(StepperAxis::new(Coordinate::Y, 10.0)))
        .unwrap();
    let mut state = State::new(&MachineConfig::default(), LogContext::quiet());
    state.execute_line("G1 Y0.1", &driver).unwrap();

    let step = PinMock::new(&[]);
    let dir = PinMock::new(&[]);
    let mut output = PinOutput::new(RecordingDelay::default(), LogContext::quiet());
    output.attach(AxisPins::new(step, dir, false)).unwrap();

    assert!(output.run(state.scheduler_mut()).is_err());

    let (mut axes, _) = output.release();
    axes[0].step.done();
    axes[0].dir.done();
}
