//! Property tests for unit conversion and step quantization.

use gcode_stepper::config::{Coordinate, LengthUnit, PositionMode};
use gcode_stepper::driver::StepperAxis;
use gcode_stepper::motion::LinearMove;
use gcode_stepper::{
    CartesianDriver, LogContext, MachineConfig, Quantizer, State, StepEvent, StepSource,
    TerminationPolicy, UnitConverter,
};
use proptest::prelude::*;

fn driver() -> CartesianDriver {
    CartesianDriver::new()
        .with_axis(StepperAxis::new(Coordinate::X, 20.0))
        .and_then(|d| d.with_axis(StepperAxis::new(Coordinate::Y, 20.0)))
        .and_then(|d| d.with_axis(StepperAxis::new(Coordinate::Z, 50.0)))
        .and_then(|d| d.with_axis(StepperAxis::new(Coordinate::E, 30.0)))
        .unwrap()
}

fn unit() -> impl Strategy<Value = LengthUnit> {
    prop_oneof![Just(LengthUnit::Millimeter), Just(LengthUnit::Inch)]
}

fn positioning() -> impl Strategy<Value = PositionMode> {
    prop_oneof![Just(PositionMode::Absolute), Just(PositionMode::Relative)]
}

fn point() -> impl Strategy<Value = [f32; 4]> {
    prop::array::uniform4(-20.0f32..20.0)
}

proptest! {
    #[test]
    fn absolute_conversion_inverts(
        unit in unit(),
        positioning in positioning(),
        scale in 0.5f32..4.0,
        value in -100.0f32..100.0,
        dest in -100.0f32..100.0,
    ) {
        let conv = UnitConverter::new(unit, positioning).with_scales([scale; 4]);
        let primitive = conv.to_absolute(Coordinate::X, value, dest);
        let back = conv.from_absolute(Coordinate::X, primitive, dest);
        prop_assert!((back - value).abs() <= 1e-3 * (1.0 + value.abs()));
    }

    #[test]
    fn events_ordered_with_ascending_ties(start in point(), target in point(), rate in 5.0f32..80.0) {
        let quantizer = Quantizer::new(TerminationPolicy::Longest, LogContext::quiet());
        let mv = LinearMove::new(start, target, rate, rate / 4.0);
        let mut events: Vec<StepEvent> = Vec::new();
        quantizer.quantize(&driver(), &mv, &mut events).unwrap();

        for pair in events.windows(2) {
            prop_assert!(pair[0].time <= pair[1].time);
            if pair[0].time == pair[1].time {
                prop_assert!(pair[0].axis < pair[1].axis);
            }
        }
    }

    #[test]
    fn net_steps_match_displacement(start in point(), target in point()) {
        let quantizer = Quantizer::new(TerminationPolicy::Longest, LogContext::quiet());
        let mv = LinearMove::new(start, target, 40.0, 10.0);
        let mut events: Vec<StepEvent> = Vec::new();
        quantizer.quantize(&driver(), &mv, &mut events).unwrap();

        for (axis, spm) in [20.0f32, 20.0, 50.0, 30.0].into_iter().enumerate() {
            let net: i64 = events
                .iter()
                .filter(|e| e.axis == axis)
                .map(|e| e.direction.sign())
                .sum();
            let expected = (target[axis] * spm).round() as i64 - (start[axis] * spm).round() as i64;
            prop_assert!((net - expected).abs() <= 1, "axis {}: {} vs {}", axis, net, expected);
        }
    }

    #[test]
    fn session_queue_never_runs_backwards(moves in prop::collection::vec(point(), 1..6)) {
        let config = MachineConfig::cartesian_printer();
        let driver = CartesianDriver::from_config(&config);
        let mut state = State::new(&config, LogContext::quiet());

        for [x, y, z, e] in moves {
            let line = format!("G1 X{} Y{} Z{} E{}", x, y, z / 10.0, e);
            state.execute_line(&line, &driver).unwrap();
        }

        let scheduler = state.scheduler_mut();
        let mut last = 0u64;
        while let Some(event) = scheduler.pop_event() {
            prop_assert!(event.fire_time_us >= last);
            last = event.fire_time_us;
        }
    }
}
