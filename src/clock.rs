//! Monotonic time source used by the blocking control loop.

use embassy_time::{Duration, Instant};

/// Monotonic clock with a blocking sleep
///
/// The engine never reads wall-clock time, so adjustments to the system time
/// cannot stretch or shrink an animation.
pub trait Clock {
    /// Current monotonic timestamp
    fn now(&mut self) -> Instant;

    /// Block the control thread for `duration`
    fn sleep(&mut self, duration: Duration);
}

/// [`Clock`] backed by the `embassy-time` driver of the platform
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&mut self) -> Instant {
        Instant::now()
    }

    fn sleep(&mut self, duration: Duration) {
        embassy_time::block_for(duration);
    }
}
