//! Dashboard Repository Wiring Demo
//!
//! Builds the data-access core the way the dashboard does at startup:
//! a two-tier (memory + disk) cache behind a requests repository, a
//! memory-only analytics repository, and a registry holding both.
//!
//! Usage:
//!   cargo run --example dashboard_repositories

use rti_data::cache::{
    CacheStrategy, CompositeCacheStrategy, FileCacheConfig, FileCacheStrategy,
    MemoryCacheConfig, MemoryCacheStrategy,
};
use rti_data::error::Result as DataResult;
use rti_data::repository::{
    CachedRepository, FnDataSource, RepositoryConfig, RepositoryRegistry,
};
use rti_data::transform::{FilteringTransform, FnTransform};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, Level};

#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawRtiRequest {
    id: String,
    subject: String,
    status: String,
    days_pending: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct RequestCard {
    id: String,
    title: String,
    overdue: bool,
}

type RequestsRepo = CachedRepository<Vec<RawRtiRequest>, Vec<RequestCard>>;
type TilesRepo = CachedRepository<Vec<u32>, String>;

fn mock_requests(_key: &str) -> DataResult<Vec<RawRtiRequest>> {
    Ok(vec![
        RawRtiRequest {
            id: "RTI-2024-001".into(),
            subject: "municipal road contracts".into(),
            status: "open".into(),
            days_pending: 45,
        },
        RawRtiRequest {
            id: "RTI-2024-002".into(),
            subject: "school meal program audit".into(),
            status: "closed".into(),
            days_pending: 4,
        },
        RawRtiRequest {
            id: "RTI-2024-003".into(),
            subject: "water supply tenders".into(),
            status: "open".into(),
            days_pending: 12,
        },
    ])
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .init();

    info!("=== RTI Dashboard Data Core Demo ===");

    // Two-tier cache: a small fast memory layer in front of a durable
    // file layer. Reads that hit the file layer backfill memory.
    let cache_dir = std::env::temp_dir().join("rti-data-demo");
    let layers: Vec<Arc<dyn CacheStrategy<Vec<RequestCard>>>> = vec![
        Arc::new(MemoryCacheStrategy::new(
            MemoryCacheConfig::builder()
                .default_ttl(Duration::from_secs(60))
                .max_entries(256)
                .build(),
        )),
        Arc::new(FileCacheStrategy::new(
            FileCacheConfig::new(&cache_dir).with_default_ttl(Duration::from_secs(600)),
        )),
    ];
    let request_cache = Arc::new(CompositeCacheStrategy::new(layers)?);

    let requests_config: RepositoryConfig<Vec<RawRtiRequest>, Vec<RequestCard>> =
        RepositoryConfig::builder()
            .with_cache_strategy(request_cache.clone())
            .with_transformation_strategy(Arc::new(FilteringTransform::new(
                |r: &RawRtiRequest| r.status == "open",
                FnTransform::new(|r: RawRtiRequest| RequestCard {
                    id: r.id,
                    title: r.subject,
                    overdue: r.days_pending > 30,
                }),
            )))
            .with_base_url("https://rti.example.org/api")
            .try_build()?;

    let requests_repo: Arc<RequestsRepo> = Arc::new(CachedRepository::new(
        "requests",
        requests_config,
        Arc::new(FnDataSource::new(mock_requests)),
    ));

    // Analytics tiles only need a volatile per-process cache.
    let tiles_config: RepositoryConfig<Vec<u32>, String> = RepositoryConfig::builder()
        .with_transformation_strategy(Arc::new(FnTransform::new(|counts: Vec<u32>| {
            format!("{} requests filed this month", counts.iter().sum::<u32>())
        })))
        .try_build()?;

    let tiles_repo: Arc<TilesRepo> = Arc::new(CachedRepository::new(
        "tiles",
        tiles_config,
        Arc::new(FnDataSource::new(|_key: &str| Ok(vec![12, 7, 3]))),
    ));

    let registry = RepositoryRegistry::new();
    registry.register("requests", requests_repo);
    registry.register("tiles", tiles_repo);
    info!("registered repositories: {:?}", registry.names());

    let requests = registry
        .get::<RequestsRepo>("requests")
        .ok_or_else(|| anyhow::anyhow!("requests repository is not registered"))?;

    let open = requests.get("requests:open").await?;
    info!("first read (fetched + transformed): {} open cards", open.len());
    for card in &open {
        info!("  {} {} overdue={}", card.id, card.title, card.overdue);
    }

    let cached = requests.get("requests:open").await?;
    info!("second read (served from cache): {} open cards", cached.len());

    if let Some(stats) = request_cache.stats().await {
        info!("request cache stats: {}", stats);
    }

    let tiles = registry
        .get::<TilesRepo>("tiles")
        .ok_or_else(|| anyhow::anyhow!("tiles repository is not registered"))?;
    info!("analytics tile: {}", tiles.get("tiles:filed").await?);

    Ok(())
}
