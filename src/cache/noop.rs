//! Null Object cache strategy

use crate::cache::strategy::CacheStrategy;
use async_trait::async_trait;
use std::time::Duration;

/// A cache that never stores anything.
///
/// Every `get` is a miss and every write is discarded, so caching can be
/// disabled for a repository without touching any call sites.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpCacheStrategy;

impl NoOpCacheStrategy {
    /// Create a new no-op cache
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl<T> CacheStrategy<T> for NoOpCacheStrategy
where
    T: Send + Sync + 'static,
{
    async fn get(&self, _key: &str) -> Option<T> {
        None
    }

    async fn set(&self, _key: &str, _data: T, _ttl: Option<Duration>) {}

    async fn has(&self, _key: &str) -> bool {
        false
    }

    async fn delete(&self, _key: &str) {}

    async fn clear(&self) {}
}
