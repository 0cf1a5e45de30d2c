use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Idle clients are only swept once this many are tracked.
const PRUNE_THRESHOLD: usize = 1024;

/// A simple rate limiter using a sliding window algorithm.
///
/// It tracks request timestamps for each user ID to determine if a new
/// request is allowed. Safe to share between request handlers.
pub struct RateLimiter {
    /// Stores timestamps of requests for each client ID, oldest first.
    requests: Mutex<HashMap<String, VecDeque<Instant>>>,
    /// The maximum number of requests allowed within the `window`.
    limit: usize,
    /// The duration of the sliding window.
    window: Duration,
}

impl RateLimiter {
    /// Creates a new `RateLimiter`.
    ///
    /// # Arguments
    ///
    /// * `limit` - The number of requests allowed per `window`.
    /// * `window` - The time duration of the sliding window.
    pub fn new(limit: usize, window: Duration) -> Self {
        RateLimiter {
            requests: Mutex::new(HashMap::new()),
            limit,
            window,
        }
    }

    /// Records a request from `id` if it is within the limit.
    ///
    /// Returns the time until the oldest request leaves the window when the
    /// limit is exhausted.
    pub fn check(&self, id: &str) -> Result<(), Duration> {
        let now = Instant::now();
        let mut requests = self
            .requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        // Drop clients whose whole history has aged out
        if requests.len() > PRUNE_THRESHOLD {
            requests.retain(|_, stamps| {
                stamps
                    .back()
                    .is_some_and(|&last| now.duration_since(last) < self.window)
            });
        }

        let client_requests = requests.entry(id.to_string()).or_default();
        while client_requests
            .front()
            .is_some_and(|&first| now.duration_since(first) >= self.window)
        {
            client_requests.pop_front();
        }

        if client_requests.len() < self.limit {
            client_requests.push_back(now);
            return Ok(());
        }

        let wait = client_requests
            .front()
            .map(|&first| self.window.saturating_sub(now.duration_since(first)))
            .unwrap_or(self.window);
        Err(wait)
    }

    #[cfg(test)]
    fn tracked_clients(&self) -> usize {
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }
}
