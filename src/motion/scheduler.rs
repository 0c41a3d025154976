//! Time-ordered step event queue.
//!
//! The interpreter appends events through [`EventSink`]; the real-time output
//! stage removes them from the front through [`StepSource`]. Fire times are
//! cumulative microseconds on the scheduler's own timebase: each move starts
//! where the previous move's horizon ended.

use alloc::collections::VecDeque;
use alloc::vec::Vec;

use super::event::{StepDirection, StepEvent};

/// Receiver of quantized step events.
pub trait EventSink {
    /// A new move starts; following events are relative to its start.
    fn begin_move(&mut self) {}

    /// Append one event. Events arrive non-decreasing in time.
    fn push(&mut self, event: StepEvent);

    /// The move spans `duration` seconds from its start.
    fn end_move(&mut self, _duration: f32) {}
}

impl EventSink for Vec<StepEvent> {
    fn push(&mut self, event: StepEvent) {
        Vec::push(self, event);
    }
}

/// Drain interface for the real-time output stage.
pub trait StepSource {
    /// Remove the next event.
    fn pop_event(&mut self) -> Option<ScheduledEvent>;

    /// Fire time of the next event, in microseconds.
    fn peek_fire_time(&self) -> Option<u64>;

    /// Number of queued events.
    fn depth(&self) -> usize;
}

/// A step event placed on the scheduler timebase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledEvent {
    /// Absolute fire time in microseconds.
    pub fire_time_us: u64,
    /// Microseconds since the previously queued event.
    pub delay_us: u64,
    /// Driver axis index.
    pub axis: usize,
    /// Step direction.
    pub direction: StepDirection,
}

/// Unbounded FIFO of scheduled step events.
#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    queue: VecDeque<ScheduledEvent>,
    /// Start of the move currently being queued.
    origin_us: u64,
    /// End of the latest queued move.
    horizon_us: u64,
    /// Fire time of the most recently queued event.
    last_fire_us: u64,
}

impl Scheduler {
    /// Create an empty scheduler at time zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of queued events.
    #[inline]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// True when nothing is queued.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// End of the latest queued move, in microseconds.
    #[inline]
    pub fn horizon_us(&self) -> u64 {
        self.horizon_us
    }

    /// Look at the next event without removing it.
    pub fn peek(&self) -> Option<&ScheduledEvent> {
        self.queue.front()
    }

    /// Iterate queued events in fire order.
    pub fn iter(&self) -> impl Iterator<Item = &ScheduledEvent> {
        self.queue.iter()
    }

    /// Drop every queued event. The timebase keeps running.
    pub fn clear(&mut self) {
        self.queue.clear();
    }
}

impl EventSink for Scheduler {
    fn begin_move(&mut self) {
        self.origin_us = self.horizon_us;
    }

    fn push(&mut self, event: StepEvent) {
        let fire = (self.origin_us + secs_to_us(event.time)).max(self.last_fire_us);
        let scheduled = ScheduledEvent {
            fire_time_us: fire,
            delay_us: fire - self.last_fire_us,
            axis: event.axis,
            direction: event.direction,
        };
        self.last_fire_us = fire;
        self.horizon_us = self.horizon_us.max(fire);
        self.queue.push_back(scheduled);
    }

    fn end_move(&mut self, duration: f32) {
        self.horizon_us = self.horizon_us.max(self.origin_us + secs_to_us(duration));
    }
}

impl StepSource for Scheduler {
    fn pop_event(&mut self) -> Option<ScheduledEvent> {
        self.queue.pop_front()
    }

    fn peek_fire_time(&self) -> Option<u64> {
        self.queue.front().map(|e| e.fire_time_us)
    }

    fn depth(&self) -> usize {
        self.queue.len()
    }
}

fn secs_to_us(secs: f32) -> u64 {
    if secs.is_finite() && secs > 0.0 {
        libm::round(secs as f64 * 1_000_000.0) as u64
    } else {
        0
    }
}
