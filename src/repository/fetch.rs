//! The get-or-fetch control flow tying caches, transforms, and sources
//! together

use crate::error::{DataError, Result};
use crate::repository::config::RepositoryConfig;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, warn};

/// Where a repository obtains raw data on a cache miss.
///
/// Implementations resolve a cache key into a raw payload, typically by
/// calling an HTTP endpoint derived from the repository's `base_url` or by
/// reading a mock fixture.
#[async_trait]
pub trait DataSource<Raw>: Send + Sync {
    /// Fetch the raw payload for `key`
    async fn fetch(&self, key: &str) -> Result<Raw>;
}

/// Adapter turning a synchronous closure into a [`DataSource`], mostly for
/// mock fixtures and tests.
pub struct FnDataSource<F> {
    f: F,
}

impl<F> FnDataSource<F> {
    /// Wrap a closure as a data source
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

#[async_trait]
impl<Raw, F> DataSource<Raw> for FnDataSource<F>
where
    F: Fn(&str) -> Result<Raw> + Send + Sync,
    Raw: Send + 'static,
{
    async fn fetch(&self, key: &str) -> Result<Raw> {
        (self.f)(key)
    }
}

/// A named repository owning the get-or-fetch control flow.
///
/// `get` asks the configured cache first; on a miss it fetches raw data
/// from the source (retrying per the config), runs it through the
/// transformation strategy, stores the transformed result back into the
/// cache, and returns it.
pub struct CachedRepository<Raw, Out> {
    name: String,
    config: RepositoryConfig<Raw, Out>,
    source: Arc<dyn DataSource<Raw>>,
}

impl<Raw, Out> CachedRepository<Raw, Out>
where
    Raw: Send + Sync + 'static,
    Out: Clone + Send + Sync + 'static,
{
    /// Create a repository from its configuration and data source
    pub fn new(
        name: impl Into<String>,
        config: RepositoryConfig<Raw, Out>,
        source: Arc<dyn DataSource<Raw>>,
    ) -> Self {
        Self {
            name: name.into(),
            config,
            source,
        }
    }

    /// The repository's registered name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The configuration this repository was built with
    pub fn config(&self) -> &RepositoryConfig<Raw, Out> {
        &self.config
    }

    /// Return the value for `key`, from cache when fresh, fetching and
    /// transforming otherwise.
    pub async fn get(&self, key: &str) -> Result<Out> {
        if let Some(cached) = self.config.cache_strategy.get(key).await {
            debug!("repository {} served {} from cache", self.name, key);
            return Ok(cached);
        }

        self.refresh(key).await
    }

    /// Fetch, transform, and cache the value for `key`, bypassing the
    /// cached copy (the dashboard's pull-to-refresh path).
    pub async fn refresh(&self, key: &str) -> Result<Out> {
        let raw = self.fetch_with_retry(key).await?;
        let transformed = self.config.transformation_strategy.transform(raw);

        self.config
            .cache_strategy
            .set(key, transformed.clone(), None)
            .await;

        Ok(transformed)
    }

    /// Drop the cached value for `key`, forcing the next `get` to fetch
    pub async fn invalidate(&self, key: &str) {
        self.config.cache_strategy.delete(key).await;
    }

    async fn fetch_with_retry(&self, key: &str) -> Result<Raw> {
        let max_attempts = if self.config.enable_retry {
            self.config.retry_attempts.max(1)
        } else {
            1
        };

        let mut last_error = String::new();

        for attempt in 1..=max_attempts {
            match self.source.fetch(key).await {
                Ok(raw) => return Ok(raw),
                Err(e) => {
                    warn!(
                        "repository {} fetch attempt {}/{} failed for {}: {}",
                        self.name, attempt, max_attempts, key, e
                    );
                    last_error = e.to_string();

                    if attempt < max_attempts {
                        tokio::time::sleep(self.config.retry_delay).await;
                    }
                }
            }
        }

        Err(DataError::RetryExhausted {
            attempts: max_attempts,
            last_error,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::strategy::FnTransform;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    fn counting_source(
        calls: Arc<AtomicUsize>,
        fail_first: usize,
    ) -> Arc<dyn DataSource<String>> {
        Arc::new(FnDataSource::new(move |key: &str| {
            let attempt = calls.fetch_add(1, Ordering::SeqCst) + 1;
            if attempt <= fail_first {
                Err(DataError::Fetch(format!("attempt {} refused", attempt)))
            } else {
                Ok(format!("raw:{}", key))
            }
        }))
    }

    fn fast_retry_config() -> RepositoryConfig<String, String> {
        RepositoryConfig::builder()
            .with_retry_delay(Duration::from_millis(1))
            .build()
    }

    #[tokio::test]
    async fn test_miss_fetches_transforms_and_caches() {
        let calls = Arc::new(AtomicUsize::new(0));
        let config: RepositoryConfig<String, String> = RepositoryConfig::builder()
            .with_transformation_strategy(Arc::new(FnTransform::new(|raw: String| {
                raw.to_uppercase()
            })))
            .try_build()
            .unwrap();
        let repo = CachedRepository::new("requests", config, counting_source(calls.clone(), 0));

        assert_eq!(repo.get("rti-1").await.unwrap(), "RAW:RTI-1");

        // Second read is served from cache: the source is not consulted.
        assert_eq!(repo.get("rti-1").await.unwrap(), "RAW:RTI-1");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_retry_recovers_from_transient_failures() {
        let calls = Arc::new(AtomicUsize::new(0));
        let repo = CachedRepository::new(
            "requests",
            fast_retry_config(),
            counting_source(calls.clone(), 2),
        );

        assert_eq!(repo.get("k").await.unwrap(), "raw:k");
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_retry_exhaustion() {
        let calls = Arc::new(AtomicUsize::new(0));
        let repo = CachedRepository::new(
            "requests",
            fast_retry_config(),
            counting_source(calls.clone(), usize::MAX),
        );

        let err = repo.get("k").await.unwrap_err();
        assert!(matches!(err, DataError::RetryExhausted { attempts: 3, .. }));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_retry_disabled_makes_one_attempt() {
        let calls = Arc::new(AtomicUsize::new(0));
        let config: RepositoryConfig<String, String> =
            RepositoryConfig::builder().with_retry(false).build();
        let repo =
            CachedRepository::new("requests", config, counting_source(calls.clone(), usize::MAX));

        let err = repo.get("k").await.unwrap_err();
        assert!(matches!(err, DataError::RetryExhausted { attempts: 1, .. }));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_invalidate_forces_refetch() {
        let calls = Arc::new(AtomicUsize::new(0));
        let repo = CachedRepository::new(
            "requests",
            fast_retry_config(),
            counting_source(calls.clone(), 0),
        );

        repo.get("k").await.unwrap();
        repo.invalidate("k").await;
        repo.get("k").await.unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_refresh_bypasses_cached_copy() {
        let calls = Arc::new(AtomicUsize::new(0));
        let repo = CachedRepository::new(
            "requests",
            fast_retry_config(),
            counting_source(calls.clone(), 0),
        );

        repo.get("k").await.unwrap();
        repo.refresh("k").await.unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
