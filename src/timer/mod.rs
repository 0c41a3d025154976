//! Timing utilities.
//!
//! Provides a monotonic [`Clock`] abstraction and the self-resetting
//! [`IntervalTimer`] used to detect under-serviced periodic tasks.

mod clock;
mod interval;

pub use clock::Clock;
#[cfg(feature = "std")]
pub use clock::StdClock;
pub use interval::IntervalTimer;
