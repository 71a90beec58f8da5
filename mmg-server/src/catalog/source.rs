//! Upstream catalog of candidate movies

use super::CatalogItem;
use crate::{Error, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info};

/// Produces the raw, unvalidated candidate list
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn fetch(&self) -> Result<Vec<CatalogItem>>;
}

/// Fetches a JSON array of movie records over HTTP
pub struct HttpCatalogSource {
    client: Client,
    url: String,
}

impl HttpCatalogSource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl CatalogSource for HttpCatalogSource {
    async fn fetch(&self) -> Result<Vec<CatalogItem>> {
        debug!(url = %self.url, "Fetching catalog");

        let bytes = self
            .client
            .get(&self.url)
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;

        let items = parse_records(serde_json::from_slice(&bytes)?)?;
        info!(url = %self.url, candidates = items.len(), "Catalog fetched");
        Ok(items)
    }
}

/// Upstream record shape; unknown fields are ignored
///
/// The poster may arrive under `posterURL`, `imageRef` or `image`, in
/// that order of preference.
#[derive(Debug, Deserialize)]
struct RawRecord {
    #[serde(default)]
    title: Option<String>,
    #[serde(default, rename = "posterURL")]
    poster_url: Option<String>,
    #[serde(default, rename = "imageRef")]
    image_ref: Option<String>,
    #[serde(default)]
    image: Option<String>,
}

impl RawRecord {
    fn into_item(self) -> Option<CatalogItem> {
        let poster = self.poster_url.or(self.image_ref).or(self.image)?;
        CatalogItem::new(self.title?, poster)
    }
}

/// Convert a catalog body into candidates
///
/// The body must be a JSON array. Elements that are not objects, or that
/// lack a non-blank title or poster reference, are skipped.
pub fn parse_records(body: Value) -> Result<Vec<CatalogItem>> {
    let Value::Array(records) = body else {
        return Err(Error::Catalog("expected a JSON array of records".to_string()));
    };

    let total = records.len();
    let items: Vec<CatalogItem> = records
        .into_iter()
        .filter_map(|record| serde_json::from_value::<RawRecord>(record).ok())
        .filter_map(RawRecord::into_item)
        .collect();

    if items.len() < total {
        debug!(skipped = total - items.len(), "Skipped incomplete catalog records");
    }
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_upstream_shape_and_ignores_extra_fields() {
        let items = parse_records(json!([
            {"id": 1, "title": "Toy Story", "posterURL": "http://img/toy.jpg", "imdbId": "tt0114709"},
            {"id": 2, "title": "Up", "imageRef": "http://img/up.jpg"},
        ]))
        .unwrap();

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].title(), "Toy Story");
        assert_eq!(items[0].image_ref(), "http://img/toy.jpg");
        assert_eq!(items[1].image_ref(), "http://img/up.jpg");
    }

    #[test]
    fn incomplete_records_are_skipped() {
        let items = parse_records(json!([
            {"title": "No Poster"},
            {"posterURL": "http://img/untitled.jpg"},
            {"title": "", "posterURL": "http://img/blank.jpg"},
            {"title": 42, "posterURL": "http://img/numeric.jpg"},
            "not an object",
            {"title": "Coco", "posterURL": "http://img/coco.jpg"},
        ]))
        .unwrap();

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].title(), "Coco");
    }

    #[test]
    fn poster_url_wins_over_other_image_fields() {
        let items = parse_records(json!([
            {"title": "Up", "posterURL": "http://img/up.jpg", "imageRef": "http://img/up-alt.jpg"},
            {"title": "Coco", "image": "http://img/coco-small.jpg", "posterURL": "http://img/coco.jpg"},
            {"title": "Luca", "imageRef": "http://img/luca.jpg", "image": "http://img/luca-small.jpg"},
        ]))
        .unwrap();

        assert_eq!(items.len(), 3);
        assert_eq!(items[0].image_ref(), "http://img/up.jpg");
        assert_eq!(items[1].image_ref(), "http://img/coco.jpg");
        assert_eq!(items[2].image_ref(), "http://img/luca.jpg");
    }

    #[test]
    fn non_array_body_is_an_error() {
        let err = parse_records(json!({"error": 404, "message": "Not Found"})).unwrap_err();
        assert!(matches!(err, Error::Catalog(_)));
    }
}
