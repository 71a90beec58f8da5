//! Poster reachability probe
//!
//! A candidate is playable only if its poster actually loads; broken
//! links are common in the upstream catalog.

use async_trait::async_trait;
use reqwest::{header, Client};
use std::time::Duration;
use tracing::debug;

/// Decides whether an image reference is loadable
///
/// Implementations never fail: every error, including a timeout,
/// resolves to `false`.
#[async_trait]
pub trait AssetValidator: Send + Sync {
    async fn validate(&self, image_ref: &str) -> bool;
}

/// Probes posters with an HTTP GET
///
/// A poster is valid when the response is 2xx and its `Content-Type`,
/// if present, is an image type.
pub struct HttpAssetValidator {
    client: Client,
    timeout: Duration,
}

impl HttpAssetValidator {
    /// Create a validator whose probes give up after `timeout`
    pub fn new(timeout: Duration) -> crate::Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, timeout })
    }
}

#[async_trait]
impl AssetValidator for HttpAssetValidator {
    async fn validate(&self, image_ref: &str) -> bool {
        let probe = self.client.get(image_ref).send();

        match tokio::time::timeout(self.timeout, probe).await {
            Ok(Ok(response)) => {
                let status = response.status();
                let content_type = response
                    .headers()
                    .get(header::CONTENT_TYPE)
                    .and_then(|v| v.to_str().ok())
                    .map(str::to_owned);
                let valid = is_image_response(status.is_success(), content_type.as_deref());
                if !valid {
                    debug!(image_ref, %status, ?content_type, "Poster rejected");
                }
                valid
            }
            Ok(Err(e)) => {
                debug!(image_ref, error = %e, "Poster probe failed");
                false
            }
            Err(_) => {
                debug!(image_ref, timeout_ms = self.timeout.as_millis() as u64, "Poster probe timed out");
                false
            }
        }
    }
}

fn is_image_response(success: bool, content_type: Option<&str>) -> bool {
    success
        && content_type
            .map(|ct| ct.trim().to_ascii_lowercase().starts_with("image/"))
            .unwrap_or(true)
}
