//! Clocks for frame pacing

use std::thread;
use std::time::{Duration, Instant};

use super::Clock;

/// Wall clock backed by [`Instant`], sleeping between frames
#[derive(Debug, Clone)]
pub struct FixedRateClock {
    start: Instant,
}

impl FixedRateClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for FixedRateClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for FixedRateClock {
    fn now(&self) -> Duration {
        self.start.elapsed()
    }

    fn wait_until(&mut self, deadline: Duration) {
        let now = self.now();
        if deadline > now {
            thread::sleep(deadline - now);
        }
    }
}

/// Clock that only moves when told to
///
/// Waiting jumps straight to the deadline, so headless runs and tests never
/// sleep.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Duration,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&mut self, by: Duration) {
        self.now += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now
    }

    fn wait_until(&mut self, deadline: Duration) {
        self.now = self.now.max(deadline);
    }
}
