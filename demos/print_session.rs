//! Example: interpret a short print job and drain it through the output stage.
//!
//! Loads a printer configuration (or uses the built-in cartesian printer),
//! feeds G-code lines to the interpreter, then pulses console pins from the
//! step queue.
//!
//! Run with: `cargo run --example print_session -- [printer.toml]`

use std::env;

use gcode_stepper::driver::AxisPins;
use gcode_stepper::{
    load_config, CartesianDriver, LogContext, MachineConfig, PinOutput, State, Temperatures,
};

const JOB: &[&str] = &[
    "M110 N0",
    "G21 ; millimetres",
    "G90",
    "M83",
    "M105",
    "G1 X10 Y10 F1200",
    "G1 X20 Y10 E0.5",
    "G1 X20 Y20 E0.5",
    "G91",
    "G1 Z0.2",
    "G999 ; not supported",
    "G92 X0 Y0",
];

/// STEP or DIR pin that only counts edges.
#[derive(Default)]
struct CountingPin {
    rising: u32,
}

impl embedded_hal::digital::ErrorType for CountingPin {
    type Error = core::convert::Infallible;
}

impl embedded_hal::digital::OutputPin for CountingPin {
    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.rising += 1;
        Ok(())
    }

    fn set_low(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Delay that accumulates instead of sleeping.
#[derive(Default)]
struct VirtualDelay {
    elapsed_ns: u64,
}

impl embedded_hal::delay::DelayNs for VirtualDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.elapsed_ns += u64::from(ns);
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = match env::args().nth(1) {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path);
            load_config(&path)?
        }
        None => MachineConfig::cartesian_printer(),
    };

    let log = LogContext::from_config(&config);
    let mut driver = CartesianDriver::from_config(&config);
    driver.set_temperatures(Temperatures::new(205, 60));
    let mut state = State::new(&config, log);

    for line in JOB {
        match state.execute_line(line, &driver) {
            Ok(response) if !response.is_none() => println!("{:<24} -> {}", line, response),
            Ok(_) => println!("{:<24} -> queued ({} events)", line, state.queue_depth()),
            Err(e) => println!("{:<24} -> error: {}", line, e),
        }
    }

    let mut output = PinOutput::new(VirtualDelay::default(), log);
    for axis in &config.axes {
        output.attach(AxisPins::new(
            CountingPin::default(),
            CountingPin::default(),
            axis.invert_direction,
        ))?;
    }

    let emitted = output.run(state.scheduler_mut())?;
    for (index, name) in config.axis_names().enumerate() {
        println!("axis {:>2}: {} steps from origin", name, output.position(index).unwrap_or(0));
    }

    let (_, delay) = output.release();
    println!(
        "emitted {} events over {:.3} s",
        emitted,
        delay.elapsed_ns as f64 / 1e9
    );

    Ok(())
}
