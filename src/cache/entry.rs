//! Cache entry management with TTL support

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A single cached value together with its freshness window.
///
/// Entries are immutable once created: a `set` on any strategy always
/// replaces the prior entry rather than mutating it, so `created_at` is
/// always the time of the last write for that key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry<T> {
    /// The cached value
    pub data: T,

    /// When the entry was written
    pub created_at: DateTime<Utc>,

    /// Time-to-live from `created_at`
    pub ttl: Duration,
}

impl<T> CacheEntry<T> {
    /// Create a new entry stamped with the current time
    pub fn new(data: T, ttl: Duration) -> Self {
        Self {
            data,
            created_at: Utc::now(),
            ttl,
        }
    }

    /// Check whether the entry is past its TTL.
    ///
    /// An entry is expired iff `now - created_at > ttl`, so an entry read
    /// at exactly its TTL boundary is still a hit.
    pub fn is_expired(&self) -> bool {
        self.age() > self.ttl
    }

    /// Get the age of the entry
    pub fn age(&self) -> Duration {
        (Utc::now() - self.created_at)
            .to_std()
            .unwrap_or(Duration::from_secs(0))
    }

    /// Get time until expiration, or `None` if already expired
    pub fn time_until_expiration(&self) -> Option<Duration> {
        self.ttl.checked_sub(self.age()).filter(|d| !d.is_zero())
    }
}
