/// Per-identity posting rate limits.
///
/// Fixed-window counters: O(1) space per identity and one atomic
/// increment-and-compare per admission. The known boundary-burst
/// imprecision (up to 2K posts straddling a window edge) is accepted.
///
/// Two implementations sit behind the `RateLimiter` trait:
/// - `RedisRateLimiter` keeps counters in a shared store and is safe across
///   any number of service instances.
/// - `InMemoryRateLimiter` keeps counters in process memory and is correct
///   only for a single-instance deployment.
use async_trait::async_trait;
use dashmap::DashMap;
use redis::aio::ConnectionManager;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use uuid::Uuid;

/// Rate limiting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Maximum number of posts admitted per window
    pub max_posts: u32,
    /// Window length in seconds
    pub window_seconds: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_posts: 1,
            window_seconds: 60,
        }
    }
}

/// Outcome of an admission check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    Admitted,
    Rejected { retry_after: Duration },
}

#[async_trait]
pub trait RateLimiter: Send + Sync {
    /// Admit or reject one post attempt by `identity_id`. Rejections carry
    /// the time remaining until the identity's window resets.
    async fn try_admit(&self, identity_id: Uuid) -> Admission;
}

// =====================================================================
// Redis-backed limiter (shared across instances)
// =====================================================================

// INCR and EXPIRE must happen in one round trip, otherwise two concurrent
// first posts race on the TTL. TTL is read back for retry-after reporting.
const ADMIT_SCRIPT: &str = r#"
    local current = redis.call('INCR', KEYS[1])
    if current == 1 then
        redis.call('EXPIRE', KEYS[1], ARGV[1])
    end
    local ttl = redis.call('TTL', KEYS[1])
    return {current, ttl}
"#;

pub struct RedisRateLimiter {
    redis: ConnectionManager,
    config: RateLimitConfig,
}

impl RedisRateLimiter {
    pub fn new(redis: ConnectionManager, config: RateLimitConfig) -> Self {
        Self { redis, config }
    }

    async fn window_state(&self, key: &str) -> Result<(i64, i64), redis::RedisError> {
        let mut conn = self.redis.clone();
        redis::cmd("EVAL")
            .arg(ADMIT_SCRIPT)
            .arg(1)
            .arg(key)
            .arg(self.config.window_seconds)
            .query_async(&mut conn)
            .await
    }
}

#[async_trait]
impl RateLimiter for RedisRateLimiter {
    async fn try_admit(&self, identity_id: Uuid) -> Admission {
        let key = format!("post_rate:{}", identity_id);
        match self.window_state(&key).await {
            Ok((count, ttl)) => {
                if count > i64::from(self.config.max_posts) {
                    Admission::Rejected {
                        retry_after: Duration::from_secs(ttl.max(1) as u64),
                    }
                } else {
                    Admission::Admitted
                }
            }
            Err(err) => {
                // Throttling is best-effort; an unreachable backend must not
                // take the write path down with it.
                tracing::warn!(%identity_id, "rate limiter unavailable, admitting: {}", err);
                Admission::Admitted
            }
        }
    }
}

// =====================================================================
// In-process limiter (single instance only)
// =====================================================================

struct Window {
    started: Instant,
    count: u32,
}

/// Fixed-window counters held in process memory.
///
/// State is neither shared nor durable: counters reset on restart and are
/// not visible to other instances. Deployments running more than one
/// replica must use `RedisRateLimiter` instead.
pub struct InMemoryRateLimiter {
    windows: DashMap<Uuid, Window>,
    config: RateLimitConfig,
}

impl InMemoryRateLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            windows: DashMap::new(),
            config,
        }
    }

    fn window_len(&self) -> Duration {
        Duration::from_secs(self.config.window_seconds)
    }

    /// Drop windows that have expired. Entries are also reset lazily on
    /// access; this exists so idle identities do not accumulate forever.
    pub fn purge_expired(&self) {
        let window = self.window_len();
        self.windows.retain(|_, w| w.started.elapsed() < window);
    }

    #[cfg(test)]
    fn tracked_identities(&self) -> usize {
        self.windows.len()
    }
}

#[async_trait]
impl RateLimiter for InMemoryRateLimiter {
    async fn try_admit(&self, identity_id: Uuid) -> Admission {
        let window = self.window_len();
        // the entry guard holds the shard lock, making the
        // increment-and-compare atomic per identity
        let mut entry = self.windows.entry(identity_id).or_insert_with(|| Window {
            started: Instant::now(),
            count: 0,
        });

        let elapsed = entry.started.elapsed();
        if elapsed >= window {
            entry.started = Instant::now();
            entry.count = 1;
            return Admission::Admitted;
        }

        if entry.count < self.config.max_posts {
            entry.count += 1;
            Admission::Admitted
        } else {
            Admission::Rejected {
                retry_after: window - elapsed,
            }
        }
    }
}
