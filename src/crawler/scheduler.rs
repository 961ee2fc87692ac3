//! Request pacing
//!
//! The stats site bans clients that request pages too quickly, so every
//! request waits until a minimum interval has passed since the previous
//! one finished. There is exactly one host and one in-flight request, so a
//! single timestamp is all the state needed.

use std::time::{Duration, Instant};

/// Enforces a minimum interval between consecutive requests
#[derive(Debug, Clone)]
pub struct Throttle {
    /// Minimum time between one request finishing and the next starting
    min_interval: Duration,

    /// When the previous request finished
    last_request: Option<Instant>,
}

impl Throttle {
    /// Creates a throttle that has not seen any request yet
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_request: None,
        }
    }

    /// The configured minimum interval
    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// How long a request issued at `now` would have to wait
    pub fn time_until_ready(&self, now: Instant) -> Duration {
        match self.last_request {
            Some(last) => (last + self.min_interval).saturating_duration_since(now),
            None => Duration::ZERO,
        }
    }

    /// Waits until the next request may start
    pub async fn wait(&self) {
        let delay = self.time_until_ready(Instant::now());
        if !delay.is_zero() {
            tracing::debug!("Waiting {:?} before next request", delay);
            tokio::time::sleep(delay).await;
        }
    }

    /// Records that a request has just finished, successfully or not
    pub fn mark_done(&mut self) {
        self.last_request = Some(Instant::now());
    }
}
