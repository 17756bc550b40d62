//! # RTI Dashboard Data Core (rti-data)
//!
//! The data-access layer behind a civic-transparency dashboard: layered
//! caching, composable data transformation, and the repository
//! configuration that ties them together.
//!
//! ## Features
//!
//! - Multi-tier caching with TTL-based expiration and automatic backfill
//!   of faster layers on a deep hit
//! - Interchangeable cache strategies: in-memory, persistent file-backed,
//!   no-op, and composite stacks
//! - Fail-open cache semantics: storage trouble degrades to a miss, never
//!   to an error on the fetch path
//! - Composable transformation pipelines (chain, array lift, filter,
//!   branch, memoize) for shaping raw payloads into view-models
//! - Repository configs built fluently, with retrying fetch and an
//!   explicit registry of named repository instances
//!
//! ## Getting a value
//!
//! ```no_run
//! use rti_data::cache::{CompositeCacheStrategy, FileCacheConfig, FileCacheStrategy,
//!     MemoryCacheStrategy, CacheStrategy};
//! use rti_data::repository::{CachedRepository, FnDataSource, RepositoryConfig};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     // L1 in memory, L2 on disk; reads backfill L1 after a disk hit.
//!     let layers: Vec<Arc<dyn CacheStrategy<String>>> = vec![
//!         Arc::new(MemoryCacheStrategy::default()),
//!         Arc::new(FileCacheStrategy::new(FileCacheConfig::new("/tmp/rti-cache"))),
//!     ];
//!     let cache = Arc::new(CompositeCacheStrategy::new(layers)?);
//!
//!     let config: RepositoryConfig<String, String> = RepositoryConfig::builder()
//!         .with_cache_strategy(cache)
//!         .with_base_url("https://rti.example.org/api")
//!         .build();
//!
//!     let source = Arc::new(FnDataSource::new(|key: &str| Ok(format!("payload:{}", key))));
//!     let requests = CachedRepository::new("requests", config, source);
//!
//!     let page = requests.get("requests:open:page:1").await?;
//!     println!("{}", page);
//!     Ok(())
//! }
//! ```
//!
//! ## Shaping data
//!
//! ```rust
//! use rti_data::transform::{FilteringTransform, FnTransform, TransformStrategy};
//!
//! let evens_doubled = FilteringTransform::new(
//!     |n: &u32| n % 2 == 0,
//!     FnTransform::new(|n: u32| n * 2),
//! );
//! assert_eq!(evens_doubled.transform(vec![1, 2, 3, 4]), vec![4, 8]);
//! ```

pub mod cache;
pub mod error;
pub mod repository;
pub mod transform;

// Re-export main types for convenience
pub use cache::{
    CacheEntry, CacheStats, CacheStrategy, CompositeCacheStrategy, FileCacheConfig,
    FileCacheStrategy, MemoryCacheConfig, MemoryCacheConfigBuilder, MemoryCacheStrategy,
    NoOpCacheStrategy, DEFAULT_TTL,
};
pub use error::{DataError, Result};
pub use repository::{
    CachedRepository, DataSource, FnDataSource, RepositoryConfig, RepositoryConfigBuilder,
    RepositoryRegistry,
};
pub use transform::{
    ArrayTransform, ChainTransform, ComposedTransform, ConditionalTransform, FilteringTransform,
    FnTransform, IdentityTransform, MemoizedTransform, TransformStrategy, TransformStrategyExt,
};
