//! Per-key admission control using the generic cell rate algorithm (GCRA)
//!
//! Each key stores a single theoretical arrival time (TAT). A request is
//! admitted when moving the TAT forward by one emission interval keeps it
//! within the delay tolerance of the current time. With a quota of
//! `max_rate` per `period` and a burst of `max_burst`, a fresh key admits
//! `max_burst + 1` requests back to back, then one per emission interval.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use tracing::debug;

use crate::config::{DEFAULT_RATE_BURST, DEFAULT_RATE_MAX_KEYS, DEFAULT_RATE_PER_MINUTE};

/// Time source for the governor
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

/// Monotonic wall clock
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Sustained rate plus burst allowance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quota {
    pub max_rate: u32,
    pub period: Duration,
    pub max_burst: u32,
}

impl Quota {
    pub fn per_minute(max_rate: u32, max_burst: u32) -> Self {
        Self {
            max_rate,
            period: Duration::from_secs(60),
            max_burst,
        }
    }

    /// Time between two requests at the sustained rate
    pub fn emission_interval(&self) -> Duration {
        self.period / self.max_rate.max(1)
    }

    /// Number of requests a fresh key admits at once
    pub fn limit(&self) -> u32 {
        self.max_burst.saturating_add(1)
    }

    fn delay_tolerance(&self) -> Duration {
        self.emission_interval().saturating_mul(self.limit())
    }
}

impl Default for Quota {
    fn default() -> Self {
        Self::per_minute(DEFAULT_RATE_PER_MINUTE, DEFAULT_RATE_BURST)
    }
}

/// Outcome of a single admission check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimitResult {
    pub allowed: bool,
    /// Requests a fully drained key admits at once
    pub limit: u32,
    /// Requests still admissible right now
    pub remaining: u32,
    /// Time until the key is fully drained again
    pub reset_after: Duration,
    /// Time until the next request would be admitted (rejections only)
    pub retry_after: Option<Duration>,
}

/// Process-wide rate governor keyed by an arbitrary string (the request path).
///
/// Every decision reads and writes the key's state under one lock, so
/// concurrent callers never over-admit.
pub struct RateGovernor {
    quota: Quota,
    clock: Arc<dyn Clock>,
    max_keys: usize,
    state: Mutex<HashMap<String, Instant>>,
}

impl RateGovernor {
    pub fn new(quota: Quota) -> Self {
        Self::with_clock(quota, Arc::new(SystemClock))
    }

    pub fn with_clock(quota: Quota, clock: Arc<dyn Clock>) -> Self {
        Self {
            quota,
            clock,
            max_keys: DEFAULT_RATE_MAX_KEYS,
            state: Mutex::new(HashMap::new()),
        }
    }

    /// Bound the number of tracked keys (at least one).
    pub fn with_max_keys(mut self, max_keys: usize) -> Self {
        self.max_keys = max_keys.max(1);
        self
    }

    /// Number of keys currently tracked
    pub fn tracked_keys(&self) -> usize {
        self.state.lock().len()
    }

    /// Admit or reject one request for `key`, updating its state on admission.
    pub fn check(&self, key: &str) -> RateLimitResult {
        let now = self.clock.now();
        let interval = self.quota.emission_interval();
        let tolerance = self.quota.delay_tolerance();
        let limit = self.quota.limit();

        let mut state = self.state.lock();

        let tat = state
            .get(key)
            .copied()
            .filter(|&tat| tat > now)
            .unwrap_or(now);
        let new_tat = tat + interval;
        let used = new_tat - now;

        if used > tolerance {
            let retry_after = used - tolerance;
            debug!(key, ?retry_after, "rate limit rejected request");
            return RateLimitResult {
                allowed: false,
                limit,
                remaining: 0,
                reset_after: tat - now,
                retry_after: Some(retry_after),
            };
        }

        if !state.contains_key(key) && state.len() >= self.max_keys {
            evict(&mut state, now, self.max_keys);
        }
        state.insert(key.to_string(), new_tat);

        let remaining = (tolerance - used).as_nanos() / interval.as_nanos().max(1);

        RateLimitResult {
            allowed: true,
            limit,
            remaining: u32::try_from(remaining).unwrap_or(u32::MAX),
            reset_after: used,
            retry_after: None,
        }
    }
}

/// Make room for one more key: drop drained keys first, then the oldest.
fn evict(state: &mut HashMap<String, Instant>, now: Instant, max_keys: usize) {
    state.retain(|_, tat| *tat > now);

    while state.len() >= max_keys {
        let Some(oldest) = state
            .iter()
            .min_by_key(|(_, tat)| **tat)
            .map(|(key, _)| key.clone())
        else {
            break;
        };
        state.remove(&oldest);
    }
}
