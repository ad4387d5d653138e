//! Inactivity watchdog.
//!
//! Tracks the time since the last user input event and reports when the
//! configured idle duration has elapsed, so the shell can log the session
//! out. Each input event resets the countdown.

use std::time::{Duration, Instant};

#[derive(Debug)]
pub struct IdleWatchdog {
    timeout: Duration,
    last_activity: Instant,
}

impl IdleWatchdog {
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            last_activity: Instant::now(),
        }
    }

    /// Records a user input event, resetting the countdown.
    pub fn touch(&mut self) {
        self.last_activity = Instant::now();
    }

    /// True once the idle duration has passed without a `touch`.
    pub fn is_expired(&self) -> bool {
        self.last_activity.elapsed() >= self.timeout
    }

    /// Time remaining until expiry, saturating at zero.
    pub fn remaining(&self) -> Duration {
        self.timeout.saturating_sub(self.last_activity.elapsed())
    }
}
