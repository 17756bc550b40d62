//! The `CacheStrategy` contract shared by all cache implementations

use crate::cache::types::CacheStats;
use async_trait::async_trait;
use std::time::Duration;

/// TTL applied when neither the caller nor the strategy configures one.
pub const DEFAULT_TTL: Duration = Duration::from_secs(5 * 60);

/// A keyed, TTL-aware store of values.
///
/// The contract is fail-open: absence, expiration, and storage failures are
/// all reported as `None`/`false`, never as errors, so a broken cache can
/// never block the primary data-fetch path. Implementations log storage
/// problems internally instead of propagating them.
///
/// Strategies are designed to be shared: wrap one in an [`Arc`](std::sync::Arc)
/// and hand it to as many repositories as should see the same entries.
#[async_trait]
pub trait CacheStrategy<T>: Send + Sync {
    /// Return the cached value for `key` if present and not expired.
    async fn get(&self, key: &str) -> Option<T>;

    /// Store `data` under `key`, replacing any prior entry.
    ///
    /// `ttl` falls back to the strategy-level default when `None`.
    async fn set(&self, key: &str, data: T, ttl: Option<Duration>);

    /// Whether a live entry exists for `key`.
    ///
    /// Defined as `get(key).is_some()`: it triggers the same expiration
    /// checks and hit/miss accounting as `get`, so it is deliberately not
    /// side-effect-free.
    async fn has(&self, key: &str) -> bool;

    /// Remove the entry for `key`, if any.
    async fn delete(&self, key: &str);

    /// Remove every entry in this strategy's namespace and reset stats.
    async fn clear(&self);

    /// Current statistics, for strategies that track them.
    async fn stats(&self) -> Option<CacheStats> {
        None
    }
}
