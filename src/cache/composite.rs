//! Multi-layer cache strategy with read-through backfill

use crate::cache::strategy::CacheStrategy;
use crate::cache::types::CacheStats;
use crate::error::{DataError, Result};
use async_trait::async_trait;
use futures::future::join_all;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// An ordered stack of cache layers, L1 (fastest, most volatile) first.
///
/// Reads query the layers strictly in order and the first hit wins; the hit
/// is then backfilled into the earlier layers so subsequent reads stop at
/// L1. Backfill walks from the hit layer toward L1 and stops at the first
/// layer that already holds the key, which bounds its cost under the
/// assumption that layering is monotonic.
///
/// Writes (`set`, `delete`, `clear`) fan out to every layer concurrently,
/// so the layers can briefly diverge while a fan-out is in flight. Each
/// layer absorbs and logs its own storage failures; a fan-out never aborts
/// part-way.
///
/// `stats` sums per-layer snapshots. The backfill probe goes through `has`,
/// which is defined in terms of `get`, so a deep hit also records one miss
/// in each earlier layer it fills.
pub struct CompositeCacheStrategy<T> {
    layers: Vec<Arc<dyn CacheStrategy<T>>>,
}

impl<T> CompositeCacheStrategy<T> {
    /// Create a composite over the given layers, in lookup order.
    ///
    /// Returns a configuration error if `layers` is empty.
    pub fn new(layers: Vec<Arc<dyn CacheStrategy<T>>>) -> Result<Self> {
        if layers.is_empty() {
            return Err(DataError::Config(
                "composite cache requires at least one layer".to_string(),
            ));
        }

        Ok(Self { layers })
    }

    /// Number of layers in lookup order
    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }
}

#[async_trait]
impl<T> CacheStrategy<T> for CompositeCacheStrategy<T>
where
    T: Clone + Send + Sync + 'static,
{
    async fn get(&self, key: &str) -> Option<T> {
        for (hit_layer, layer) in self.layers.iter().enumerate() {
            if let Some(value) = layer.get(key).await {
                debug!("composite hit at layer {}: {}", hit_layer, key);

                // Backfill toward L1, stopping at the first layer that
                // already has the key. Each receiving layer applies its
                // own default TTL.
                for earlier in self.layers[..hit_layer].iter().rev() {
                    if earlier.has(key).await {
                        break;
                    }
                    earlier.set(key, value.clone(), None).await;
                }

                return Some(value);
            }
        }

        debug!("composite miss across {} layers: {}", self.layers.len(), key);
        None
    }

    async fn set(&self, key: &str, data: T, ttl: Option<Duration>) {
        join_all(
            self.layers
                .iter()
                .map(|layer| layer.set(key, data.clone(), ttl)),
        )
        .await;
    }

    async fn has(&self, key: &str) -> bool {
        for layer in &self.layers {
            if layer.has(key).await {
                return true;
            }
        }
        false
    }

    async fn delete(&self, key: &str) {
        join_all(self.layers.iter().map(|layer| layer.delete(key))).await;
    }

    async fn clear(&self) {
        join_all(self.layers.iter().map(|layer| layer.clear())).await;
    }

    async fn stats(&self) -> Option<CacheStats> {
        let mut merged = CacheStats::default();
        let mut any = false;

        for layer in &self.layers {
            if let Some(layer_stats) = layer.stats().await {
                merged.merge(&layer_stats);
                any = true;
            }
        }

        any.then_some(merged)
    }
}
