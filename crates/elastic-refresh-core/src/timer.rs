//! Owned timers driven by elapsed time
//!
//! Both timers are advanced explicitly with the time that has passed, so the
//! controller can run on a real clock or a simulated one. A repeating timer
//! hands out [`TickToken`]s stamped with its generation; once the owner moves
//! to a new generation, tokens from the old timer no longer match.

use std::time::Duration;

/// Proof that a tick came from a particular timer instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TickToken {
    generation: u64,
}

impl TickToken {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// One-shot countdown
#[derive(Debug, Clone, PartialEq)]
pub struct Countdown {
    remaining: Duration,
}

impl Countdown {
    pub fn new(delay: Duration) -> Self {
        Self { remaining: delay }
    }

    /// Consume `elapsed`; once expired, returns the time left over past the deadline
    pub fn advance(&mut self, elapsed: Duration) -> Option<Duration> {
        if elapsed >= self.remaining {
            let overflow = elapsed - self.remaining;
            self.remaining = Duration::ZERO;
            Some(overflow)
        } else {
            self.remaining -= elapsed;
            None
        }
    }
}

/// Fixed-interval repeating timer
#[derive(Debug, Clone, PartialEq)]
pub struct RepeatingTimer {
    interval: Duration,
    generation: u64,
    carry: Duration,
    running: bool,
}

impl RepeatingTimer {
    /// Start a timer firing every `interval`; a zero interval is bumped to 1ms
    pub fn start(interval: Duration, generation: u64) -> Self {
        Self {
            interval: interval.max(Duration::from_millis(1)),
            generation,
            carry: Duration::ZERO,
            running: true,
        }
    }

    /// Stop firing; safe to call repeatedly
    pub fn stop(&mut self) {
        self.running = false;
        self.carry = Duration::ZERO;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Time accumulated since the most recent tick fell due
    pub fn since_last_tick(&self) -> Duration {
        self.carry
    }

    pub fn token(&self) -> TickToken {
        TickToken {
            generation: self.generation,
        }
    }

    /// Consume `elapsed` and return how many ticks fell due
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        if !self.running {
            return 0;
        }
        let total = self.carry + elapsed;
        let ticks = (total.as_nanos() / self.interval.as_nanos()) as u32;
        self.carry = total - self.interval * ticks;
        ticks
    }
}
