//! Repository configuration and its builder

use crate::cache::memory::MemoryCacheStrategy;
use crate::cache::strategy::CacheStrategy;
use crate::error::{DataError, Result};
use crate::transform::strategy::{IdentityTransform, TransformStrategy};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

/// How a repository fetches, caches, and shapes its data.
///
/// A config is assembled once by [`RepositoryConfigBuilder`] and owned by
/// the repository that requested it. Strategies are behind `Arc`s, so two
/// repositories share cache state only when they are explicitly built with
/// the same strategy instance.
pub struct RepositoryConfig<Raw, Out> {
    /// Where transformed values are cached
    pub cache_strategy: Arc<dyn CacheStrategy<Out>>,

    /// How raw payloads become view-models
    pub transformation_strategy: Arc<dyn TransformStrategy<Raw, Out>>,

    /// Whether fetch failures are retried
    pub enable_retry: bool,

    /// Maximum fetch attempts when retry is enabled
    pub retry_attempts: u32,

    /// Delay between fetch attempts
    pub retry_delay: Duration,

    /// Base URL the repository's data source resolves keys against
    pub base_url: String,

    /// Headers sent with every fetch
    pub default_headers: HashMap<String, String>,
}

impl<Raw, Out> Clone for RepositoryConfig<Raw, Out> {
    fn clone(&self) -> Self {
        Self {
            cache_strategy: Arc::clone(&self.cache_strategy),
            transformation_strategy: Arc::clone(&self.transformation_strategy),
            enable_retry: self.enable_retry,
            retry_attempts: self.retry_attempts,
            retry_delay: self.retry_delay,
            base_url: self.base_url.clone(),
            default_headers: self.default_headers.clone(),
        }
    }
}

impl<Raw, Out> RepositoryConfig<Raw, Out> {
    /// Start building a configuration
    pub fn builder() -> RepositoryConfigBuilder<Raw, Out> {
        RepositoryConfigBuilder::new()
    }
}

fn baseline_headers() -> HashMap<String, String> {
    HashMap::from([("Content-Type".to_string(), "application/json".to_string())])
}

/// Fluent builder accumulating overrides on top of the baseline defaults.
///
/// Each `with_*` method consumes and returns the builder; `build` produces
/// the final immutable config. Defaults: in-memory cache with a 5-minute
/// TTL, identity transformation, retry enabled with 3 attempts and a
/// 500 ms delay, and a JSON content-type header.
pub struct RepositoryConfigBuilder<Raw, Out> {
    cache_strategy: Option<Arc<dyn CacheStrategy<Out>>>,
    transformation_strategy: Option<Arc<dyn TransformStrategy<Raw, Out>>>,
    enable_retry: Option<bool>,
    retry_attempts: Option<u32>,
    retry_delay: Option<Duration>,
    base_url: Option<String>,
    headers: HashMap<String, String>,
}

impl<Raw, Out> Default for RepositoryConfigBuilder<Raw, Out> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Raw, Out> RepositoryConfigBuilder<Raw, Out> {
    /// Start from the baseline defaults
    pub fn new() -> Self {
        Self {
            cache_strategy: None,
            transformation_strategy: None,
            enable_retry: None,
            retry_attempts: None,
            retry_delay: None,
            base_url: None,
            headers: baseline_headers(),
        }
    }

    /// Use the given cache strategy
    pub fn with_cache_strategy(mut self, cache: Arc<dyn CacheStrategy<Out>>) -> Self {
        self.cache_strategy = Some(cache);
        self
    }

    /// Use the given transformation strategy
    pub fn with_transformation_strategy(
        mut self,
        transform: Arc<dyn TransformStrategy<Raw, Out>>,
    ) -> Self {
        self.transformation_strategy = Some(transform);
        self
    }

    /// Enable or disable retrying failed fetches
    pub fn with_retry(mut self, enable: bool) -> Self {
        self.enable_retry = Some(enable);
        self
    }

    /// Set the maximum number of fetch attempts
    pub fn with_retry_attempts(mut self, attempts: u32) -> Self {
        self.retry_attempts = Some(attempts);
        self
    }

    /// Set the delay between fetch attempts
    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = Some(delay);
        self
    }

    /// Set the base URL keys are resolved against
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Merge the given headers into the accumulated set, field-wise.
    ///
    /// Existing keys are overwritten; headers not mentioned are kept.
    pub fn with_headers(mut self, headers: HashMap<String, String>) -> Self {
        self.headers.extend(headers);
        self
    }

    /// Add or overwrite a single header
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }
}

impl<Raw, Out> RepositoryConfigBuilder<Raw, Out>
where
    Out: Clone + Send + Sync + 'static,
{
    /// Build a configuration for distinct raw/output types.
    ///
    /// Fails with a configuration error if no transformation strategy was
    /// supplied, since none can be defaulted when the types differ.
    pub fn try_build(mut self) -> Result<RepositoryConfig<Raw, Out>> {
        let transformation_strategy = self.transformation_strategy.take().ok_or_else(|| {
            DataError::Config(
                "a transformation strategy is required when raw and output types differ"
                    .to_string(),
            )
        })?;

        Ok(self.finish(transformation_strategy))
    }

    fn finish(
        self,
        transformation_strategy: Arc<dyn TransformStrategy<Raw, Out>>,
    ) -> RepositoryConfig<Raw, Out> {
        RepositoryConfig {
            cache_strategy: self
                .cache_strategy
                .unwrap_or_else(|| Arc::new(MemoryCacheStrategy::default())),
            transformation_strategy,
            enable_retry: self.enable_retry.unwrap_or(true),
            retry_attempts: self.retry_attempts.unwrap_or(3),
            retry_delay: self.retry_delay.unwrap_or(Duration::from_millis(500)),
            base_url: self.base_url.unwrap_or_default(),
            default_headers: self.headers,
        }
    }
}

impl<T> RepositoryConfigBuilder<T, T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Build a configuration, defaulting the transformation to identity.
    pub fn build(mut self) -> RepositoryConfig<T, T> {
        let transformation = self
            .transformation_strategy
            .take()
            .unwrap_or_else(|| Arc::new(IdentityTransform));

        self.finish(transformation)
    }
}
