use std::{
    collections::{HashMap, VecDeque},
    time::Duration,
};

use tokio::time::Instant;

/// Sliding-window limit on attempts per identifier.
#[derive(Debug)]
pub struct RateLimiter {
    max_attempts: usize,
    window: Duration,
    attempts: HashMap<String, VecDeque<Instant>>,
}

impl RateLimiter {
    pub fn new(max_attempts: usize, window: Duration) -> Self {
        Self {
            max_attempts,
            window,
            attempts: HashMap::new(),
        }
    }

    /// Records an attempt for `identifier` if it is within the limit.
    /// Otherwise returns how long until the oldest attempt leaves the window.
    pub fn check(&mut self, identifier: &str) -> Result<(), Duration> {
        self.check_at(identifier, Instant::now())
    }

    fn check_at(&mut self, identifier: &str, now: Instant) -> Result<(), Duration> {
        let window = self.window;
        // forget senders whose latest attempt has left the window
        self.attempts.retain(|_, attempts| {
            attempts
                .back()
                .is_some_and(|latest| now.saturating_duration_since(*latest) < window)
        });

        let attempts = self.attempts.entry(identifier.to_string()).or_default();
        while attempts
            .front()
            .is_some_and(|oldest| now.saturating_duration_since(*oldest) >= window)
        {
            attempts.pop_front();
        }

        if attempts.len() >= self.max_attempts {
            let remaining = attempts
                .front()
                .map_or(window, |oldest| window.saturating_sub(now - *oldest));
            return Err(remaining);
        }

        attempts.push_back(now);
        Ok(())
    }
}

/// Whole minutes, rounded up, shown to a rate-limited user.
pub fn minutes_until_reset(remaining: Duration) -> u64 {
    remaining.as_millis().div_ceil(60_000) as u64
}
