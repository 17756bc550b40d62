//! # Repository Composition
//!
//! The composition root of the data-access core: a [`RepositoryConfig`]
//! binds a cache strategy, a transformation strategy, and retry/fetch
//! settings into one named unit; [`CachedRepository`] owns the
//! get-or-fetch control flow; [`RepositoryRegistry`] holds the named
//! instances for the rest of the application.
//!
//! ## Example
//!
//! ```rust
//! use rti_data::repository::{
//!     CachedRepository, FnDataSource, RepositoryConfig, RepositoryRegistry,
//! };
//! use std::sync::Arc;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config: RepositoryConfig<String, String> = RepositoryConfig::builder()
//!     .with_base_url("https://rti.example.org/api")
//!     .build();
//!
//! let source = Arc::new(FnDataSource::new(|key: &str| Ok(format!("payload for {}", key))));
//! let repo = Arc::new(CachedRepository::new("requests", config, source));
//!
//! let registry = RepositoryRegistry::new();
//! registry.register("requests", repo.clone());
//!
//! let page = repo.get("requests:open:page:1").await?;
//! println!("{}", page);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod fetch;
pub mod registry;

pub use config::{RepositoryConfig, RepositoryConfigBuilder};
pub use fetch::{CachedRepository, DataSource, FnDataSource};
pub use registry::RepositoryRegistry;
