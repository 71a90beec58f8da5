//! Catalog acquisition
//!
//! A catalog load fetches candidate movies from a [`CatalogSource`],
//! probes every poster through an [`AssetValidator`] and publishes the
//! survivors as a [`ValidatedCatalog`].

pub mod loader;
pub mod source;
pub mod validator;

pub use loader::{CatalogLoader, LoadReport, LoadStatus};
pub use source::{CatalogSource, HttpCatalogSource};
pub use validator::{AssetValidator, HttpAssetValidator};

use serde::Serialize;
use std::collections::HashSet;
use std::sync::Arc;

/// A playable movie: title (identity key) and poster reference
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct CatalogItem {
    title: String,
    image_ref: String,
}

impl CatalogItem {
    /// Returns `None` when either field is blank
    pub fn new(title: impl Into<String>, image_ref: impl Into<String>) -> Option<Self> {
        let title = title.into();
        let image_ref = image_ref.into();
        if title.trim().is_empty() || image_ref.trim().is_empty() {
            return None;
        }
        Some(Self { title, image_ref })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn image_ref(&self) -> &str {
        &self.image_ref
    }
}

/// Ordered, title-unique sequence of items whose posters passed validation
///
/// Cloning shares the underlying items.
#[derive(Debug, Clone, Default)]
pub struct ValidatedCatalog {
    items: Arc<Vec<CatalogItem>>,
}

impl ValidatedCatalog {
    /// Build a catalog from already-validated items
    ///
    /// Later items repeating an earlier title are dropped; relative order
    /// of the kept items is preserved.
    pub fn from_items(items: impl IntoIterator<Item = CatalogItem>) -> Self {
        let mut seen = HashSet::new();
        let items = items
            .into_iter()
            .filter(|item| seen.insert(item.title.clone()))
            .collect();
        Self {
            items: Arc::new(items),
        }
    }

    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
