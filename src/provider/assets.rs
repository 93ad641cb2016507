//! Recent asset listing from the VOD provider
//!
//! `GET {base}/vod/v1/assets?limit=N&page=1&sort=lastModificationDate&desc=true`
//! with a bearer token; the response carries the records in `items`.

use crate::{
    Result,
    auth::AccessToken,
    config::settings::ProviderSettings,
    types::{Asset, AssetPage},
};
use reqwest::Client;

/// Path of the asset collection below the API base URL
pub const ASSETS_PATH: &str = "/vod/v1/assets";

/// Trait for the asset listing so the portal can be tested with fakes
#[async_trait::async_trait]
pub trait AssetLister: Send + Sync + std::fmt::Debug {
    /// Most recently modified assets first. No retries.
    async fn list_recent(&self, token: &AccessToken) -> Result<Vec<Asset>>;
}

/// reqwest-backed asset listing client
#[derive(Debug, Clone)]
pub struct VodApiClient {
    client: Client,
    base_url: String,
    limit: u32,
}

impl VodApiClient {
    pub fn new(client: Client, base_url: impl Into<String>, limit: u32) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            limit,
        }
    }

    pub fn from_settings(client: Client, provider: &ProviderSettings) -> Self {
        Self::new(client, provider.resolved_api_base_url(), provider.asset_limit)
    }

    pub fn assets_url(&self) -> String {
        format!("{}{}", self.base_url, ASSETS_PATH)
    }
}

#[async_trait::async_trait]
impl AssetLister for VodApiClient {
    async fn list_recent(&self, token: &AccessToken) -> Result<Vec<Asset>> {
        let url = self.assets_url();
        tracing::debug!("Listing {} most recent assets from {}", self.limit, url);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("limit", self.limit.to_string()),
                ("page", "1".to_string()),
                ("sort", "lastModificationDate".to_string()),
                ("desc", "true".to_string()),
            ])
            .bearer_auth(token.value())
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to send asset listing request: {}", e);
                crate::Error::asset_list(format!("Network request failed: {}", e), None)
            })?;

        let status = response.status();
        if !status.is_success() {
            tracing::error!("Asset listing returned error status: {}", status);
            return Err(crate::Error::asset_list(
                format!("Assets endpoint returned {}", status),
                Some(status.as_u16()),
            ));
        }

        let page: AssetPage = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse asset listing: {}", e);
            crate::Error::asset_list(
                format!("Malformed asset listing: {}", e),
                Some(status.as_u16()),
            )
        })?;

        tracing::debug!("Asset listing returned {} items", page.items.len());
        Ok(page.items)
    }
}
