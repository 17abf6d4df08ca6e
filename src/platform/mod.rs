//! Platform abstraction layer
//!
//! The host environment supplies two collaborators to the frame driver:
//! - Input: a discrete key-state provider polled once per frame
//! - Time: a monotonic clock that can also wait for the next frame
//!
//! Real and scripted implementations of both live in the submodules.

pub mod input;
pub mod time;

use std::time::Duration;

pub use input::{DemoInput, InputSnapshot, ScriptedInput};
pub use time::{FixedRateClock, ManualClock};

/// Source of key events, polled once per frame
pub trait InputSource {
    /// Codes currently held and codes pressed since the last poll
    fn poll(&mut self) -> InputSnapshot;
}

/// Monotonic time source for frame pacing
pub trait Clock {
    /// Time elapsed since the clock started
    fn now(&self) -> Duration;

    /// Block (or pretend to) until `deadline` has been reached
    fn wait_until(&mut self, deadline: Duration);
}
