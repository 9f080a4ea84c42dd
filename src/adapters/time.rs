//! System time adapter.
//!
//! Implements [`Clock`] on top of `std::thread::sleep`.

use std::time::Duration;

use crate::app::ports::Clock;

/// Clock backed by the operating system.
#[derive(Debug, Default)]
pub struct SystemClock;

impl SystemClock {
    pub fn new() -> Self {
        Self
    }
}

impl Clock for SystemClock {
    fn sleep(&self, duration: Duration) {
        if !duration.is_zero() {
            std::thread::sleep(duration);
        }
    }
}
