//! Catalog loading with validation and superseded-load detection
//!
//! One load is a single pass: fetch, shuffle, probe every poster
//! concurrently, keep survivors in shuffled order, drop duplicate titles.
//! The catalog is returned only after every probe has settled.
//!
//! Each load takes a new generation number. Consumers publish a report
//! only while [`CatalogLoader::is_current`] holds for its generation, so
//! a slow load that finishes after a newer one started is discarded.

use super::{AssetValidator, CatalogSource, ValidatedCatalog};
use crate::game::{shuffle, MIN_CARDS};
use futures::future::join_all;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

/// How a load ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    /// Enough items validated; the catalog may be published
    Ready,
    /// Fetch succeeded but too few posters validated
    BelowMinimum { found: usize, required: usize },
    /// Fetch or parse failed; the catalog is empty
    Failed(String),
}

/// Result of one [`CatalogLoader::load`] call
#[derive(Debug, Clone)]
pub struct LoadReport {
    pub generation: u64,
    pub catalog: ValidatedCatalog,
    pub status: LoadStatus,
}

impl LoadReport {
    pub fn is_ready(&self) -> bool {
        self.status == LoadStatus::Ready
    }
}

/// Produces validated catalogs from a source and a validator
pub struct CatalogLoader {
    source: Arc<dyn CatalogSource>,
    validator: Arc<dyn AssetValidator>,
    min_required: usize,
    generation: AtomicU64,
    rng: Mutex<StdRng>,
}

impl CatalogLoader {
    /// `min_required` is raised to [`MIN_CARDS`] if lower
    pub fn new(
        source: Arc<dyn CatalogSource>,
        validator: Arc<dyn AssetValidator>,
        min_required: usize,
    ) -> Self {
        Self::with_rng(source, validator, min_required, StdRng::from_entropy())
    }

    /// Loader shuffling candidates with the given RNG
    pub fn with_rng(
        source: Arc<dyn CatalogSource>,
        validator: Arc<dyn AssetValidator>,
        min_required: usize,
        rng: StdRng,
    ) -> Self {
        if min_required < MIN_CARDS {
            warn!(
                min_required,
                "Minimum catalog size below {}, raising it", MIN_CARDS
            );
        }
        Self {
            source,
            validator,
            min_required: min_required.max(MIN_CARDS),
            generation: AtomicU64::new(0),
            rng: Mutex::new(rng),
        }
    }

    pub fn min_required(&self) -> usize {
        self.min_required
    }

    /// Generation of the most recently started load (0 before any load)
    pub fn current_generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// True when no load was started after `generation`
    pub fn is_current(&self, generation: u64) -> bool {
        self.current_generation() == generation
    }

    /// Run one load pass; never fails, see [`LoadStatus`]
    pub async fn load(&self) -> LoadReport {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        info!(generation, "Catalog load started");

        let candidates = match self.source.fetch().await {
            Ok(candidates) => candidates,
            Err(e) => {
                error!(generation, error = %e, "Catalog load failed");
                return LoadReport {
                    generation,
                    catalog: ValidatedCatalog::default(),
                    status: LoadStatus::Failed(e.to_string()),
                };
            }
        };

        let candidates = {
            let mut rng = self.rng.lock().await;
            shuffle(&candidates, &mut *rng)
        };

        let verdicts = join_all(
            candidates
                .iter()
                .map(|item| self.validator.validate(item.image_ref())),
        )
        .await;

        let survivors = candidates
            .into_iter()
            .zip(verdicts)
            .filter_map(|(item, valid)| valid.then_some(item));
        let catalog = ValidatedCatalog::from_items(survivors);

        debug!(generation, validated = catalog.len(), "Poster validation settled");

        let status = if catalog.len() < self.min_required {
            warn!(
                generation,
                found = catalog.len(),
                required = self.min_required,
                "Too few playable movies in catalog"
            );
            LoadStatus::BelowMinimum {
                found: catalog.len(),
                required: self.min_required,
            }
        } else {
            info!(generation, count = catalog.len(), "Catalog load complete");
            LoadStatus::Ready
        };

        LoadReport {
            generation,
            catalog,
            status,
        }
    }
}
