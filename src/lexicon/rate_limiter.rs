// Interval rate limiter for remote knowledge base lookups.
//
// Datamuse asks clients to stay well under its daily quota, and concurrent
// scoring would otherwise fire a burst of requests at once. Each acquire
// reserves the next free slot, spaced `interval` apart.

use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::time::{Duration, Instant};

/// Enforces a maximum request rate across all clones.
#[derive(Clone)]
pub struct RateLimiter {
    inner: Arc<Mutex<RateLimiterInner>>,
}

struct RateLimiterInner {
    /// Minimum time between requests
    interval: Duration,
    /// Earliest instant the next request may start
    next_slot: Option<Instant>,
}

impl RateLimiter {
    /// Create a limiter that allows `requests_per_second` requests per second.
    pub fn new(requests_per_second: f64) -> Self {
        let interval = Duration::from_secs_f64(1.0 / requests_per_second);
        Self {
            inner: Arc::new(Mutex::new(RateLimiterInner {
                interval,
                next_slot: None,
            })),
        }
    }

    /// Wait until a request is allowed, then return.
    ///
    /// The slot is reserved while holding the lock and the sleep happens after
    /// releasing it, so concurrent callers queue up one interval apart.
    pub async fn acquire(&self) {
        let wait_until = {
            let mut inner = self.inner.lock().await;
            let now = Instant::now();
            let slot = match inner.next_slot {
                Some(next) if next > now => next,
                _ => now,
            };
            inner.next_slot = Some(slot + inner.interval);
            slot
        };

        tokio::time::sleep_until(wait_until).await;
    }
}
