//! Shared fakes for mmg-server integration tests
#![allow(dead_code)]

use async_trait::async_trait;
use mmg_common::EventBus;
use mmg_server::catalog::{AssetValidator, CatalogItem, CatalogLoader, CatalogSource};
use mmg_server::session::LoadResolution;
use mmg_server::{Error, GameSession, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// `n` items titled "Movie 0".."Movie n-1"
pub fn items(n: usize) -> Vec<CatalogItem> {
    items_with_prefix("Movie", n)
}

pub fn items_with_prefix(prefix: &str, n: usize) -> Vec<CatalogItem> {
    (0..n)
        .map(|i| {
            CatalogItem::new(format!("{prefix} {i}"), format!("http://posters/{prefix}-{i}.jpg"))
                .unwrap()
        })
        .collect()
}

/// Source returning a fixed list
pub struct StaticSource(pub Vec<CatalogItem>);

#[async_trait]
impl CatalogSource for StaticSource {
    async fn fetch(&self) -> Result<Vec<CatalogItem>> {
        Ok(self.0.clone())
    }
}

/// Source that always fails
pub struct FailingSource;

#[async_trait]
impl CatalogSource for FailingSource {
    async fn fetch(&self) -> Result<Vec<CatalogItem>> {
        Err(Error::Catalog("upstream unavailable".to_string()))
    }
}

/// Source whose first fetch is slow and returns "Old" titles; later
/// fetches are immediate and return "New" titles
pub struct SlowThenFastSource {
    calls: AtomicUsize,
    first_delay: Duration,
    size: usize,
}

impl SlowThenFastSource {
    pub fn new(first_delay: Duration, size: usize) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            first_delay,
            size,
        }
    }
}

#[async_trait]
impl CatalogSource for SlowThenFastSource {
    async fn fetch(&self) -> Result<Vec<CatalogItem>> {
        if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
            tokio::time::sleep(self.first_delay).await;
            Ok(items_with_prefix("Old", self.size))
        } else {
            Ok(items_with_prefix("New", self.size))
        }
    }
}

/// Validator accepting everything except the listed image references
#[derive(Default)]
pub struct ListValidator {
    broken: HashSet<String>,
}

impl ListValidator {
    pub fn rejecting<'a>(refs: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            broken: refs.into_iter().map(str::to_string).collect(),
        }
    }
}

#[async_trait]
impl AssetValidator for ListValidator {
    async fn validate(&self, image_ref: &str) -> bool {
        !self.broken.contains(image_ref)
    }
}

pub fn loader(source: impl CatalogSource + 'static, min_required: usize) -> CatalogLoader {
    CatalogLoader::new(
        Arc::new(source),
        Arc::new(ListValidator::default()),
        min_required,
    )
}

/// Session over `catalog_size` always-valid items, not yet loaded
pub fn session(catalog_size: usize, cards: usize, movies: usize, seed: u64) -> Arc<GameSession> {
    Arc::new(GameSession::with_rng(
        loader(StaticSource(items(catalog_size)), 2),
        cards,
        movies,
        EventBus::new(64),
        StdRng::seed_from_u64(seed),
    ))
}

/// Session with its catalog already published
pub async fn loaded_session(
    catalog_size: usize,
    cards: usize,
    movies: usize,
    seed: u64,
) -> Arc<GameSession> {
    let session = session(catalog_size, cards, movies, seed);
    let resolution = session.load_catalog().await;
    assert_eq!(
        resolution,
        LoadResolution::Published {
            count: catalog_size
        }
    );
    session
}
