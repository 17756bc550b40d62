//! Persistent cache strategy backed by prefix-namespaced JSON files
//!
//! Each entry is written as a `{data, created_at, ttl}` envelope to its own
//! file named `<prefix><encoded-key>.json` inside a configured directory.
//! The prefix keeps this strategy's files apart from anything else living
//! in the same directory: `clear` removes only matching files.
//!
//! The strategy is fail-open throughout. Read or parse problems are logged
//! and reported as misses; a failed write is treated as storage pressure
//! and recovers by wiping the whole prefix namespace. If the directory
//! cannot be created at construction time the strategy goes inert and every
//! operation becomes a no-op, so it stays safe to call from shared code
//! paths that sometimes run without writable storage.

use crate::cache::entry::CacheEntry;
use crate::cache::strategy::{CacheStrategy, DEFAULT_TTL};
use crate::cache::types::CacheStats;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::io::ErrorKind;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, warn};

/// Default file-name prefix for entries
pub const DEFAULT_PREFIX: &str = "cache:";

/// Configuration for [`FileCacheStrategy`]
#[derive(Debug, Clone)]
pub struct FileCacheConfig {
    /// Directory holding the entry files
    pub directory: PathBuf,

    /// File-name prefix namespacing this strategy's entries
    pub prefix: String,

    /// TTL applied when `set` is called without one
    pub default_ttl: Duration,
}

impl FileCacheConfig {
    /// Configuration with the default prefix and TTL
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            prefix: DEFAULT_PREFIX.to_string(),
            default_ttl: DEFAULT_TTL,
        }
    }

    /// Override the file-name prefix
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Override the default TTL
    pub fn with_default_ttl(mut self, ttl: Duration) -> Self {
        self.default_ttl = ttl;
        self
    }
}

/// Durable cache strategy persisting one JSON envelope per entry.
pub struct FileCacheStrategy<T> {
    config: FileCacheConfig,
    enabled: bool,
    stats: Arc<RwLock<CacheStats>>,
    _marker: PhantomData<fn() -> T>,
}

impl<T> FileCacheStrategy<T> {
    /// Create a new file-backed cache.
    ///
    /// If the directory cannot be created the strategy is returned in inert
    /// mode: every operation is a no-op and `get` always misses.
    pub fn new(config: FileCacheConfig) -> Self {
        let enabled = match fs::create_dir_all(&config.directory) {
            Ok(()) => true,
            Err(e) => {
                warn!(
                    "file cache disabled, cannot create {}: {}",
                    config.directory.display(),
                    e
                );
                false
            }
        };

        Self {
            config,
            enabled,
            stats: Arc::new(RwLock::new(CacheStats::default())),
            _marker: PhantomData,
        }
    }

    /// Whether the strategy has writable storage behind it
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// The configuration this strategy was built with
    pub fn config(&self) -> &FileCacheConfig {
        &self.config
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        self.config
            .directory
            .join(format!("{}{}.json", self.config.prefix, encode_key(key)))
    }

    fn is_namespace_file(&self, path: &Path) -> bool {
        path.file_name()
            .and_then(|n| n.to_str())
            .map(|n| n.starts_with(&self.config.prefix))
            .unwrap_or(false)
    }

    /// Remove every file under this strategy's prefix, leaving foreign
    /// files in the directory untouched.
    fn clear_namespace(&self) {
        let entries = match fs::read_dir(&self.config.directory) {
            Ok(entries) => entries,
            Err(e) => {
                warn!(
                    "file cache clear failed to list {}: {}",
                    self.config.directory.display(),
                    e
                );
                return;
            }
        };

        for dir_entry in entries.flatten() {
            let path = dir_entry.path();
            if self.is_namespace_file(&path) {
                if let Err(e) = fs::remove_file(&path) {
                    warn!("file cache failed to remove {}: {}", path.display(), e);
                }
            }
        }
    }

    fn namespace_len(&self) -> usize {
        match fs::read_dir(&self.config.directory) {
            Ok(entries) => entries
                .flatten()
                .filter(|e| self.is_namespace_file(&e.path()))
                .count(),
            Err(_) => 0,
        }
    }
}

#[async_trait]
impl<T> CacheStrategy<T> for FileCacheStrategy<T>
where
    T: Serialize + DeserializeOwned + Send + Sync + 'static,
{
    async fn get(&self, key: &str) -> Option<T> {
        if !self.enabled {
            return None;
        }

        let path = self.entry_path(key);
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) => {
                if e.kind() != ErrorKind::NotFound {
                    warn!("file cache read failed for {}: {}", path.display(), e);
                }
                self.stats.write().await.misses += 1;
                return None;
            }
        };

        match serde_json::from_str::<CacheEntry<T>>(&raw) {
            Ok(entry) if entry.is_expired() => {
                debug!("file cache entry expired: {}", key);
                if let Err(e) = fs::remove_file(&path) {
                    warn!("file cache failed to remove {}: {}", path.display(), e);
                }
                self.stats.write().await.misses += 1;
                None
            }
            Ok(entry) => {
                debug!("file cache hit: {}", key);
                self.stats.write().await.hits += 1;
                Some(entry.data)
            }
            Err(e) => {
                warn!("file cache corrupt envelope for {}: {}", key, e);
                self.stats.write().await.misses += 1;
                None
            }
        }
    }

    async fn set(&self, key: &str, data: T, ttl: Option<Duration>) {
        if !self.enabled {
            return;
        }

        let entry = CacheEntry::new(data, ttl.unwrap_or(self.config.default_ttl));
        let envelope = match serde_json::to_string(&entry) {
            Ok(envelope) => envelope,
            Err(e) => {
                warn!("file cache failed to serialize entry for {}: {}", key, e);
                return;
            }
        };

        let path = self.entry_path(key);
        if let Err(e) = fs::write(&path, envelope) {
            // Treat a rejected write as storage pressure and recover by
            // wiping the whole namespace. Callers must expect this.
            warn!(
                "file cache write failed for {}, clearing namespace: {}",
                path.display(),
                e
            );
            self.clear_namespace();
        }
    }

    async fn has(&self, key: &str) -> bool {
        self.get(key).await.is_some()
    }

    async fn delete(&self, key: &str) {
        if !self.enabled {
            return;
        }

        let path = self.entry_path(key);
        if let Err(e) = fs::remove_file(&path) {
            if e.kind() != ErrorKind::NotFound {
                warn!("file cache delete failed for {}: {}", path.display(), e);
            }
        }
    }

    async fn clear(&self) {
        if !self.enabled {
            return;
        }

        self.clear_namespace();
        *self.stats.write().await = CacheStats::default();
    }

    async fn stats(&self) -> Option<CacheStats> {
        if !self.enabled {
            return None;
        }

        let mut stats = self.stats.read().await.clone();
        stats.size = self.namespace_len();
        Some(stats)
    }
}

/// Encode a cache key into a filename-safe form.
///
/// Alphanumerics and `. _ -` pass through; every other byte becomes `%XX`,
/// so distinct keys never collide and the literal prefix stays intact for
/// prefix-scoped enumeration.
fn encode_key(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    for byte in key.bytes() {
        match byte {
            b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'.' | b'_' | b'-' => {
                out.push(byte as char);
            }
            other => {
                out.push_str(&format!("%{:02X}", other));
            }
        }
    }
    out
}
