//! # Layered Caching
//!
//! This module implements the multi-tier caching half of the data-access
//! core: a common [`CacheStrategy`] contract with interchangeable
//! implementations selected at composition time.
//!
//! ## Features
//!
//! - **TTL-Based Expiration**: every entry carries its own time-to-live;
//!   expiration is observed lazily and surfaces as a plain miss
//! - **In-Memory Tier**: process-local map with insertion-order eviction
//!   under an optional size bound
//! - **Persistent Tier**: prefix-namespaced JSON envelope files with
//!   fail-open reads and full-namespace recovery on write failure
//! - **Null Object Tier**: [`NoOpCacheStrategy`] disables caching without
//!   touching call sites
//! - **Layering**: [`CompositeCacheStrategy`] stacks tiers L1→Ln with
//!   read-through backfill and concurrent write fan-out
//!
//! ## Example
//!
//! ```rust
//! use rti_data::cache::{CacheStrategy, MemoryCacheConfig, MemoryCacheStrategy};
//! use std::time::Duration;
//!
//! # async fn example() {
//! let config = MemoryCacheConfig::builder()
//!     .default_ttl(Duration::from_secs(300))
//!     .max_entries(10_000)
//!     .build();
//! let cache = MemoryCacheStrategy::new(config);
//!
//! cache.set("requests:open", vec!["RTI-2024-001".to_string()], None).await;
//!
//! if let Some(page) = cache.get("requests:open").await {
//!     println!("cache hit: {} ids", page.len());
//! }
//! # }
//! ```

pub mod composite;
pub mod entry;
pub mod file_store;
pub mod memory;
pub mod noop;
pub mod strategy;
pub mod types;

pub use composite::CompositeCacheStrategy;
pub use entry::CacheEntry;
pub use file_store::{FileCacheConfig, FileCacheStrategy, DEFAULT_PREFIX};
pub use memory::{MemoryCacheConfig, MemoryCacheConfigBuilder, MemoryCacheStrategy};
pub use noop::NoOpCacheStrategy;
pub use strategy::{CacheStrategy, DEFAULT_TTL};
pub use types::CacheStats;
