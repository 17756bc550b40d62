//! Core type definitions for the cache subsystem

use serde::{Deserialize, Serialize};
use std::fmt;

/// Statistics for cache performance monitoring.
///
/// Counters are monotonic and reset only by `clear()`. Note that `has` is
/// defined in terms of `get`, so probing a key also moves these counters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct CacheStats {
    /// Number of live entries currently stored
    pub size: usize,

    /// Total number of cache hits
    pub hits: u64,

    /// Total number of cache misses
    pub misses: u64,
}

impl CacheStats {
    /// Calculate cache hit rate as a percentage
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            (self.hits as f64 / total as f64) * 100.0
        }
    }

    /// Calculate miss rate as a percentage
    pub fn miss_rate(&self) -> f64 {
        100.0 - self.hit_rate()
    }

    /// Merge another stats snapshot into this one (used by composite caches)
    pub fn merge(&mut self, other: &CacheStats) {
        self.size += other.size;
        self.hits += other.hits;
        self.misses += other.misses;
    }
}

impl fmt::Display for CacheStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CacheStats {{ size: {}, hits: {}, misses: {}, hit_rate: {:.2}% }}",
            self.size,
            self.hits,
            self.misses,
            self.hit_rate()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_rate() {
        let stats = CacheStats {
            size: 10,
            hits: 80,
            misses: 20,
        };

        assert_eq!(stats.hit_rate(), 80.0);
        assert_eq!(stats.miss_rate(), 20.0);
    }

    #[test]
    fn test_zero_requests() {
        let stats = CacheStats::default();
        assert_eq!(stats.hit_rate(), 0.0);
        assert_eq!(stats.miss_rate(), 100.0);
    }

    #[test]
    fn test_merge() {
        let mut a = CacheStats {
            size: 2,
            hits: 3,
            misses: 1,
        };
        let b = CacheStats {
            size: 5,
            hits: 7,
            misses: 9,
        };

        a.merge(&b);
        assert_eq!(a.size, 7);
        assert_eq!(a.hits, 10);
        assert_eq!(a.misses, 10);
    }

    #[test]
    fn test_display() {
        let stats = CacheStats {
            size: 75,
            hits: 100,
            misses: 50,
        };

        let display = format!("{}", stats);
        assert!(display.contains("hits: 100"));
        assert!(display.contains("misses: 50"));
    }
}
