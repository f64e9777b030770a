//! In-memory per-client rate limiting with a periodic sweep.
//!
//! The limiter is an owned service object injected through application state,
//! not a module-level global: tests get isolated instances and the sweep task
//! has an explicit lifecycle. State is per-process; two instances behind a
//! load balancer count independently, which is acceptable for this use case.
//!
//! Each endpoint category gets its own keyspace: the map key is
//! `"{category}:{client}"`, so contact submissions and career subscriptions
//! from the same IP never collide.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::types::Timestamp;

/// How often expired entries are swept from the map.
pub const SWEEP_INTERVAL: Duration = Duration::from_secs(5 * 60);

/// A rate-limit policy: at most `max_requests` per `window` per client,
/// counted under `category`.
#[derive(Debug, Clone, Copy)]
pub struct RateLimitPolicy {
    pub category: &'static str,
    pub max_requests: u32,
    pub window: Duration,
}

/// Contact form submissions: 10 requests per 15 minutes per IP.
pub const CONTACT_POLICY: RateLimitPolicy = RateLimitPolicy {
    category: "contact",
    max_requests: 10,
    window: Duration::from_secs(15 * 60),
};

/// Career subscriptions: 5 requests per 15 minutes per IP.
pub const CAREERS_POLICY: RateLimitPolicy = RateLimitPolicy {
    category: "careers",
    max_requests: 5,
    window: Duration::from_secs(15 * 60),
};

/// Counter state for one client within its current window.
///
/// Replaced wholesale (not incremented) once the window expires.
#[derive(Debug, Clone)]
struct RateLimitEntry {
    count: u32,
    reset_at: Timestamp,
}

/// Outcome of a rate-limit check, carrying everything the HTTP layer needs
/// for the `X-RateLimit-*` and `Retry-After` headers.
#[derive(Debug, Clone)]
pub struct RateLimitDecision {
    pub allowed: bool,
    pub limit: u32,
    pub remaining: u32,
    pub reset_at: Timestamp,
}

impl RateLimitDecision {
    /// Whole seconds until the window resets, floored at 1 for header use.
    pub fn retry_after_secs(&self, now: Timestamp) -> i64 {
        let secs = (self.reset_at - now).num_seconds();
        secs.max(1)
    }
}

/// Sliding-window request counter keyed by `"{category}:{client}"`.
pub struct RateLimiter {
    entries: Mutex<HashMap<String, RateLimitEntry>>,
}

impl RateLimiter {
    pub fn new() -> Self {
        Self { entries: Mutex::new(HashMap::new()) }
    }

    /// Check and record one request from `client` under `policy`.
    pub fn check(&self, policy: &RateLimitPolicy, client: &str) -> RateLimitDecision {
        self.check_at(policy, client, chrono::Utc::now())
    }

    /// [`RateLimiter::check`] with an explicit clock, for tests.
    fn check_at(
        &self,
        policy: &RateLimitPolicy,
        client: &str,
        now: Timestamp,
    ) -> RateLimitDecision {
        let key = format!("{}:{}", policy.category, client);
        let window = chrono::Duration::from_std(policy.window).unwrap_or(chrono::Duration::zero());

        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());

        match entries.get_mut(&key) {
            // Fresh client, or the previous window has elapsed: replace.
            None => {
                let reset_at = now + window;
                entries.insert(key, RateLimitEntry { count: 1, reset_at });
                RateLimitDecision {
                    allowed: true,
                    limit: policy.max_requests,
                    remaining: policy.max_requests - 1,
                    reset_at,
                }
            }
            Some(entry) if now > entry.reset_at => {
                let reset_at = now + window;
                *entry = RateLimitEntry { count: 1, reset_at };
                RateLimitDecision {
                    allowed: true,
                    limit: policy.max_requests,
                    remaining: policy.max_requests - 1,
                    reset_at,
                }
            }
            // Within the window and already at the limit: deny.
            Some(entry) if entry.count >= policy.max_requests => RateLimitDecision {
                allowed: false,
                limit: policy.max_requests,
                remaining: 0,
                reset_at: entry.reset_at,
            },
            // Within the window with budget left: count it.
            Some(entry) => {
                entry.count += 1;
                RateLimitDecision {
                    allowed: true,
                    limit: policy.max_requests,
                    remaining: policy.max_requests - entry.count,
                    reset_at: entry.reset_at,
                }
            }
        }
    }

    /// Delete entries whose window has expired. Returns how many were removed.
    pub fn sweep(&self) -> usize {
        self.sweep_at(chrono::Utc::now())
    }

    fn sweep_at(&self, now: Timestamp) -> usize {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        let before = entries.len();
        entries.retain(|_, entry| now <= entry.reset_at);
        before - entries.len()
    }

    /// Run the periodic sweep until `cancel` is triggered.
    ///
    /// Fire-and-forget: spawned once at startup, cancelled on shutdown.
    pub async fn run_sweep(self: Arc<Self>, cancel: CancellationToken) {
        let mut interval = tokio::time::interval(SWEEP_INTERVAL);
        // The first tick fires immediately; skip it so startup stays quiet.
        interval.tick().await;

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::info!("Rate limit sweep stopping");
                    break;
                }
                _ = interval.tick() => {
                    let removed = self.sweep();
                    if removed > 0 {
                        tracing::debug!(removed, "Rate limit sweep: purged expired entries");
                    }
                }
            }
        }
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const POLICY: RateLimitPolicy = RateLimitPolicy {
        category: "test",
        max_requests: 3,
        window: Duration::from_secs(60),
    };

    #[test]
    fn allows_up_to_the_limit_then_denies() {
        let limiter = RateLimiter::new();
        let now = chrono::Utc::now();

        for expected_remaining in [2, 1, 0] {
            let decision = limiter.check_at(&POLICY, "1.2.3.4", now);
            assert!(decision.allowed);
            assert_eq!(decision.remaining, expected_remaining);
        }

        let denied = limiter.check_at(&POLICY, "1.2.3.4", now);
        assert!(!denied.allowed);
        assert_eq!(denied.remaining, 0);
    }

    #[test]
    fn window_elapse_replaces_the_entry() {
        let limiter = RateLimiter::new();
        let now = chrono::Utc::now();

        for _ in 0..3 {
            limiter.check_at(&POLICY, "1.2.3.4", now);
        }
        assert!(!limiter.check_at(&POLICY, "1.2.3.4", now).allowed);

        // Just past the window: allowed again with a fresh counter.
        let later = now + chrono::Duration::seconds(61);
        let decision = limiter.check_at(&POLICY, "1.2.3.4", later);
        assert!(decision.allowed);
        assert_eq!(decision.remaining, POLICY.max_requests - 1);
        assert_eq!(decision.reset_at, later + chrono::Duration::seconds(60));
    }

    #[test]
    fn clients_are_counted_independently() {
        let limiter = RateLimiter::new();
        let now = chrono::Utc::now();

        for _ in 0..3 {
            limiter.check_at(&POLICY, "1.1.1.1", now);
        }
        assert!(!limiter.check_at(&POLICY, "1.1.1.1", now).allowed);
        assert!(limiter.check_at(&POLICY, "2.2.2.2", now).allowed);
    }

    #[test]
    fn categories_do_not_share_counters() {
        let limiter = RateLimiter::new();
        let now = chrono::Utc::now();
        let other = RateLimitPolicy { category: "other", ..POLICY };

        for _ in 0..3 {
            limiter.check_at(&POLICY, "1.2.3.4", now);
        }
        assert!(!limiter.check_at(&POLICY, "1.2.3.4", now).allowed);
        // Same IP, different category: its own budget.
        assert!(limiter.check_at(&other, "1.2.3.4", now).allowed);
    }

    #[test]
    fn sweep_removes_only_expired_entries() {
        let limiter = RateLimiter::new();
        let now = chrono::Utc::now();

        limiter.check_at(&POLICY, "1.1.1.1", now);
        limiter.check_at(&POLICY, "2.2.2.2", now);
        assert_eq!(limiter.sweep_at(now), 0);

        let later = now + chrono::Duration::seconds(61);
        limiter.check_at(&POLICY, "3.3.3.3", later);
        assert_eq!(limiter.sweep_at(later), 2);
        assert_eq!(limiter.sweep_at(later), 0);
    }

    #[test]
    fn retry_after_is_at_least_one_second() {
        let decision = RateLimitDecision {
            allowed: false,
            limit: 10,
            remaining: 0,
            reset_at: chrono::Utc::now(),
        };
        assert_eq!(decision.retry_after_secs(decision.reset_at), 1);
    }
}
