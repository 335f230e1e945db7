//! Item catalog client
//!
//! Looks up item metadata from the external game database. Only used to
//! pre-fill a display field; failures degrade to a placeholder string and
//! never block submission.

use std::time::Duration;

use serde::Deserialize;
use tracing::{debug, instrument, warn};

/// Name shown when the catalog cannot resolve an item
pub const UNKNOWN_ITEM: &str = "Unknown item";

/// Raw item payload from the external database
#[derive(Debug, Clone, Deserialize)]
struct ItemPayload {
    name: String,
}

/// HTTP client for the external item database
#[derive(Debug, Clone)]
pub struct ItemCatalog {
    client: reqwest::Client,
    base_url: String,
}

impl ItemCatalog {
    /// Create a new catalog client
    ///
    /// # Errors
    /// Returns an error if the underlying HTTP client cannot be built
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    /// Look up an item name by id, degrading to [`UNKNOWN_ITEM`] on any
    /// failure (network, decode, missing item).
    #[instrument(skip(self))]
    pub async fn item_name(&self, item_id: i64) -> String {
        let url = format!("{}/api/item/{item_id}", self.base_url.trim_end_matches('/'));

        match self.fetch(&url).await {
            Ok(name) => {
                debug!(item_id, %name, "Resolved item name");
                name
            }
            Err(e) => {
                warn!(item_id, error = %e, "Item lookup failed, using placeholder");
                UNKNOWN_ITEM.to_string()
            }
        }
    }

    async fn fetch(&self, url: &str) -> Result<String, reqwest::Error> {
        let payload = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json::<ItemPayload>()
            .await?;
        Ok(payload.name)
    }
}
