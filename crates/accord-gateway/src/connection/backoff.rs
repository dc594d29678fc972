//! Reconnect backoff
//!
//! Exponential delay with jitter, capped, bounded by a maximum attempt
//! count.

use rand::Rng;
use std::time::Duration;

/// Reconnect delay schedule for one connection
#[derive(Debug, Clone)]
pub struct Backoff {
    base: Duration,
    cap: Duration,
    max_attempts: u32,
    attempt: u32,
}

impl Backoff {
    /// Create a schedule from base delay, cap, and attempt limit
    #[must_use]
    pub fn new(base: Duration, cap: Duration, max_attempts: u32) -> Self {
        Self {
            base,
            cap,
            max_attempts,
            attempt: 0,
        }
    }

    /// Attempts consumed so far
    #[must_use]
    pub fn attempt(&self) -> u32 {
        self.attempt
    }

    /// Reset after a successful handshake
    pub fn reset(&mut self) {
        self.attempt = 0;
    }

    /// Delay before the next attempt, or `None` when the limit is reached
    ///
    /// The delay doubles per attempt up to the cap, with up to 25% random
    /// jitter added so that many clients do not reconnect in lockstep.
    pub fn next_delay(&mut self) -> Option<Duration> {
        if self.attempt >= self.max_attempts {
            return None;
        }
        let exp = self.base.saturating_mul(1u32 << self.attempt.min(16));
        let capped = exp.min(self.cap);
        self.attempt += 1;

        let jitter_ms = rand::thread_rng().gen_range(0..=capped.as_millis() as u64 / 4);
        Some(capped + Duration::from_millis(jitter_ms))
    }
}
