//! In-process cache strategy with TTL expiration and bounded size

use crate::cache::entry::CacheEntry;
use crate::cache::strategy::{CacheStrategy, DEFAULT_TTL};
use crate::cache::types::CacheStats;
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::debug;

/// Configuration for [`MemoryCacheStrategy`]
#[derive(Debug, Clone)]
pub struct MemoryCacheConfig {
    /// TTL applied when `set` is called without one
    pub default_ttl: Duration,

    /// Maximum number of entries; `None` means unbounded
    pub max_entries: Option<usize>,

    /// TTL jitter factor (0.0 - 1.0), applied to every effective TTL to
    /// spread out expiration of entries written together
    pub ttl_jitter: f64,
}

impl Default for MemoryCacheConfig {
    fn default() -> Self {
        Self {
            default_ttl: DEFAULT_TTL,
            max_entries: None,
            ttl_jitter: 0.0,
        }
    }
}

impl MemoryCacheConfig {
    /// Create a new builder for memory cache configuration
    pub fn builder() -> MemoryCacheConfigBuilder {
        MemoryCacheConfigBuilder::default()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.default_ttl.is_zero() {
            return Err("default_ttl must be greater than zero".to_string());
        }

        if self.max_entries == Some(0) {
            return Err("max_entries must be greater than 0 when set".to_string());
        }

        if !(0.0..=1.0).contains(&self.ttl_jitter) {
            return Err("ttl_jitter must be between 0.0 and 1.0".to_string());
        }

        Ok(())
    }

    /// Apply the configured jitter to an effective TTL
    pub fn ttl_with_jitter(&self, base: Duration) -> Duration {
        if self.ttl_jitter == 0.0 {
            return base;
        }

        let base_secs = base.as_secs_f64();
        let jitter_range = base_secs * self.ttl_jitter;
        let jitter = (rand::random::<f64>() * 2.0 - 1.0) * jitter_range;

        Duration::from_secs_f64((base_secs + jitter).max(0.001))
    }
}

/// Builder for memory cache configuration
#[derive(Debug, Default)]
pub struct MemoryCacheConfigBuilder {
    default_ttl: Option<Duration>,
    max_entries: Option<usize>,
    ttl_jitter: Option<f64>,
}

impl MemoryCacheConfigBuilder {
    /// Set the default TTL for entries written without one
    pub fn default_ttl(mut self, ttl: Duration) -> Self {
        self.default_ttl = Some(ttl);
        self
    }

    /// Bound the cache to at most `max` entries
    pub fn max_entries(mut self, max: usize) -> Self {
        self.max_entries = Some(max);
        self
    }

    /// Set TTL jitter factor (0.0 - 1.0)
    pub fn ttl_jitter(mut self, jitter: f64) -> Self {
        self.ttl_jitter = Some(jitter);
        self
    }

    /// Build the configuration, filling unset fields from defaults
    pub fn build(self) -> MemoryCacheConfig {
        let defaults = MemoryCacheConfig::default();

        MemoryCacheConfig {
            default_ttl: self.default_ttl.unwrap_or(defaults.default_ttl),
            max_entries: self.max_entries.or(defaults.max_entries),
            ttl_jitter: self.ttl_jitter.unwrap_or(defaults.ttl_jitter),
        }
    }
}

/// Process-local cache keyed by string, with TTL expiration and optional
/// insertion-order eviction.
///
/// Eviction is deliberately FIFO over insertion order rather than LRU:
/// when the store is at capacity the single oldest-inserted entry is
/// evicted, regardless of how recently it was read. Replacing an existing
/// key counts as a fresh write and moves it to the back of the order.
pub struct MemoryCacheStrategy<T> {
    config: MemoryCacheConfig,
    store: Arc<RwLock<MemoryStore<T>>>,
}

struct MemoryStore<T> {
    entries: HashMap<String, CacheEntry<T>>,
    insertion_order: VecDeque<String>,
    stats: CacheStats,
}

impl<T> MemoryCacheStrategy<T> {
    /// Create a new memory cache with the given configuration
    pub fn new(config: MemoryCacheConfig) -> Self {
        Self {
            config,
            store: Arc::new(RwLock::new(MemoryStore {
                entries: HashMap::new(),
                insertion_order: VecDeque::new(),
                stats: CacheStats::default(),
            })),
        }
    }

    /// The configuration this strategy was built with
    pub fn config(&self) -> &MemoryCacheConfig {
        &self.config
    }

    fn remove_entry(store: &mut MemoryStore<T>, key: &str) {
        if store.entries.remove(key).is_some() {
            store.insertion_order.retain(|k| k != key);
            store.stats.size = store.entries.len();
        }
    }
}

impl<T> Default for MemoryCacheStrategy<T> {
    fn default() -> Self {
        Self::new(MemoryCacheConfig::default())
    }
}

#[async_trait]
impl<T> CacheStrategy<T> for MemoryCacheStrategy<T>
where
    T: Clone + Send + Sync + 'static,
{
    async fn get(&self, key: &str) -> Option<T> {
        let mut store = self.store.write().await;

        match store.entries.get(key) {
            Some(entry) if entry.is_expired() => {
                debug!("memory cache entry expired: {}", key);
                Self::remove_entry(&mut store, key);
                store.stats.misses += 1;
                None
            }
            Some(entry) => {
                let value = entry.data.clone();
                store.stats.hits += 1;
                debug!("memory cache hit: {}", key);
                Some(value)
            }
            None => {
                debug!("memory cache miss: {}", key);
                store.stats.misses += 1;
                None
            }
        }
    }

    async fn set(&self, key: &str, data: T, ttl: Option<Duration>) {
        let effective_ttl = self
            .config
            .ttl_with_jitter(ttl.unwrap_or(self.config.default_ttl));
        let entry = CacheEntry::new(data, effective_ttl);

        let mut store = self.store.write().await;

        if store.entries.contains_key(key) {
            // Replacement is a new write: refresh its insertion position.
            store.insertion_order.retain(|k| k != key);
        } else if let Some(max) = self.config.max_entries {
            while store.entries.len() >= max {
                match store.insertion_order.pop_front() {
                    Some(oldest) => {
                        debug!("evicting oldest-inserted entry: {}", oldest);
                        store.entries.remove(&oldest);
                    }
                    None => break,
                }
            }
        }

        store.entries.insert(key.to_string(), entry);
        store.insertion_order.push_back(key.to_string());
        store.stats.size = store.entries.len();
    }

    async fn has(&self, key: &str) -> bool {
        self.get(key).await.is_some()
    }

    async fn delete(&self, key: &str) {
        let mut store = self.store.write().await;
        Self::remove_entry(&mut store, key);
    }

    async fn clear(&self) {
        let mut store = self.store.write().await;
        store.entries.clear();
        store.insertion_order.clear();
        store.stats = CacheStats::default();
    }

    async fn stats(&self) -> Option<CacheStats> {
        let store = self.store.read().await;
        Some(store.stats.clone())
    }
}
