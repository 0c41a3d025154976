//! Movement quantizer.
//!
//! Turns a constant-velocity linear move into the ordered stream of per-axis
//! step events that approximates it. The Cartesian group (X, Y, Z) and the
//! extruder (E) travel independently; the [`TerminationPolicy`] decides which
//! group's duration bounds the move.

use heapless::Vec;
use libm::{fabsf, sqrtf};
use serde::Deserialize;

use crate::config::MAX_AXES;
use crate::driver::{Driver, MotionContext, NextStep};
use crate::error::{MotionError, Result};
use crate::log::{log_debug, log_verbose, log_warn, LogContext};

use super::event::{StepDirection, StepEvent};
use super::scheduler::EventSink;

/// Distances at or below this are treated as no motion.
const MIN_DISTANCE: f32 = 1e-6;

/// Relative slack allowed when comparing a step time against the duration.
const DURATION_TOLERANCE: f32 = 1e-5;

/// Which axis group's duration ends a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TerminationPolicy {
    /// Stop when the faster group finishes; the other group is truncated.
    #[default]
    Shortest,
    /// Run until the slower group finishes; the finished group holds still.
    Longest,
}

/// A linear move in primitive coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearMove {
    /// Position at the start, `[x, y, z, e]`.
    pub start: [f32; 4],
    /// Commanded end, `[x, y, z, e]`.
    pub target: [f32; 4],
    /// Cartesian speed, primitive units per second.
    pub vel_xyz: f32,
    /// Extrusion speed, primitive units per second.
    pub vel_e: f32,
}

impl LinearMove {
    /// Create a move.
    pub const fn new(start: [f32; 4], target: [f32; 4], vel_xyz: f32, vel_e: f32) -> Self {
        Self {
            start,
            target,
            vel_xyz,
            vel_e,
        }
    }
}

/// Velocities and durations derived from a [`LinearMove`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MovePlan {
    /// Signed velocity per coordinate.
    pub velocity: [f32; 4],
    /// Cartesian path length.
    pub distance: f32,
    /// Time for the Cartesian group, `None` if it does not move.
    pub duration_xyz: Option<f32>,
    /// Time for the extruder, `None` if it does not move.
    pub duration_e: Option<f32>,
    /// Scheduled time horizon, `None` if nothing moves.
    pub duration: Option<f32>,
}

impl MovePlan {
    /// Interpolated position at `t` seconds into the move.
    ///
    /// Each group stops advancing once its own duration has elapsed.
    pub fn position_at(&self, mv: &LinearMove, t: f32) -> [f32; 4] {
        let t_xyz = t.min(self.duration_xyz.unwrap_or(0.0));
        let t_e = t.min(self.duration_e.unwrap_or(0.0));
        [
            mv.start[0] + t_xyz * self.velocity[0],
            mv.start[1] + t_xyz * self.velocity[1],
            mv.start[2] + t_xyz * self.velocity[2],
            mv.start[3] + t_e * self.velocity[3],
        ]
    }

    fn context(&self, mv: &LinearMove, last_step: Option<f32>, direction: StepDirection) -> MotionContext {
        MotionContext {
            start: mv.start,
            target: mv.target,
            position: match last_step {
                Some(t) => self.position_at(mv, t),
                None => mv.start,
            },
            velocity: self.velocity,
            last_step,
            direction,
        }
    }
}

/// Outcome of quantizing one move.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct QuantizeSummary {
    /// Events pushed to the sink.
    pub events: usize,
    /// Scheduled duration in seconds (zero for a no-op move).
    pub duration: f32,
}

/// Converts linear moves into step events.
#[derive(Debug, Clone, Copy, Default)]
pub struct Quantizer {
    policy: TerminationPolicy,
    log: LogContext,
}

impl Quantizer {
    /// Create a quantizer.
    pub fn new(policy: TerminationPolicy, log: LogContext) -> Self {
        Self { policy, log }
    }

    /// Termination policy in effect.
    #[inline]
    pub fn policy(&self) -> TerminationPolicy {
        self.policy
    }

    /// Derive velocities and durations without emitting anything.
    ///
    /// A group with no displacement, or with a speed that is not finite and
    /// positive, does not move and does not bound the duration.
    pub fn plan(&self, mv: &LinearMove) -> MovePlan {
        let dx = mv.target[0] - mv.start[0];
        let dy = mv.target[1] - mv.start[1];
        let dz = mv.target[2] - mv.start[2];
        let de = mv.target[3] - mv.start[3];
        let distance = sqrtf(dx * dx + dy * dy + dz * dz);

        let mut velocity = [0.0f32; 4];

        let duration_xyz = if distance > MIN_DISTANCE && is_speed(mv.vel_xyz) {
            let scale = mv.vel_xyz / distance;
            velocity[0] = dx * scale;
            velocity[1] = dy * scale;
            velocity[2] = dz * scale;
            Some(distance / mv.vel_xyz)
        } else {
            None
        };

        let duration_e = if fabsf(de) > MIN_DISTANCE && is_speed(mv.vel_e) {
            velocity[3] = if de > 0.0 { mv.vel_e } else { -mv.vel_e };
            Some(fabsf(de) / mv.vel_e)
        } else {
            None
        };

        let duration = match (duration_xyz, duration_e) {
            (Some(a), Some(b)) => Some(match self.policy {
                TerminationPolicy::Shortest => a.min(b),
                TerminationPolicy::Longest => a.max(b),
            }),
            (Some(a), None) | (None, Some(a)) => Some(a),
            (None, None) => None,
        };

        MovePlan {
            velocity,
            distance,
            duration_xyz,
            duration_e,
            duration,
        }
    }

    /// Quantize `mv` into `sink`.
    ///
    /// Events are pushed in non-decreasing time order; simultaneous steps go
    /// out in ascending axis order. A driver with no axes, or a move in which
    /// nothing moves, produces no events.
    ///
    /// # Errors
    ///
    /// Returns `MotionError::TooManyAxes` if the driver exposes more than
    /// `MAX_AXES` axes. Nothing is pushed in that case.
    pub fn quantize<D, S>(&self, driver: &D, mv: &LinearMove, sink: &mut S) -> Result<QuantizeSummary>
    where
        D: Driver + ?Sized,
        S: EventSink + ?Sized,
    {
        let num_axis = driver.num_axis();
        if num_axis == 0 {
            return Ok(QuantizeSummary::default());
        }
        if num_axis > MAX_AXES {
            return Err(MotionError::TooManyAxes {
                requested: num_axis,
                max: MAX_AXES,
            }
            .into());
        }

        let plan = self.plan(mv);
        let Some(duration) = plan.duration else {
            log_debug!(self.log, "degenerate move from {:?} to {:?}, nothing to step", mv.start, mv.target);
            return Ok(QuantizeSummary::default());
        };
        let limit = duration * (1.0 + DURATION_TOLERANCE);

        // next step time per axis, `None` once the axis is done
        let mut pending: Vec<Option<NextStep>, MAX_AXES> = Vec::new();
        for axis in 0..num_axis {
            let next = driver
                .next_step(axis, &plan.context(mv, None, StepDirection::default()))
                .filter(|s| s.time.is_finite() && s.time >= 0.0);
            // num_axis <= MAX_AXES checked above
            let pushed = pending.push(next).is_ok();
            debug_assert!(pushed);
        }

        sink.begin_move();
        let mut events = 0usize;

        loop {
            let mut best: Option<(usize, NextStep)> = None;
            for (axis, p) in pending.iter().enumerate() {
                if let Some(step) = *p {
                    if best.map_or(true, |(_, b)| step.time < b.time) {
                        best = Some((axis, step));
                    }
                }
            }

            let Some((axis, step)) = best else { break };
            if step.time > limit {
                break;
            }

            sink.push(StepEvent::new(step.time, axis, step.direction));
            events += 1;
            log_verbose!(self.log, "step axis {} at {}s {:?}", axis, step.time, step.direction);

            let ctx = plan.context(mv, Some(step.time), step.direction);
            let next = match driver.next_step(axis, &ctx) {
                Some(n) if n.time.is_finite() && n.time > step.time => Some(n),
                Some(n) => {
                    log_warn!(self.log, "axis {} next step at {}s does not advance past {}s, retiring it", axis, n.time, step.time);
                    None
                }
                None => None,
            };
            pending[axis] = next;
        }

        sink.end_move(duration);
        log_debug!(self.log, "quantized move into {} events over {}s", events, duration);

        Ok(QuantizeSummary { events, duration })
    }
}

#[inline]
fn is_speed(v: f32) -> bool {
    v.is_finite() && v > 0.0
}
