//! # Portal service
//!
//! [`VodPortal`] is constructed once at startup and shared by every request.
//! Each page request runs strictly in sequence:
//!
//! 1. [`TokenCache::get`] (credential exchange only on a miss)
//! 2. [`AssetLister::list_recent`] with the bearer token
//! 3. [`vod::select`](crate::vod::select) over the listing
//!
//! Failures in steps 1 and 2 are returned as upstream errors. A selection
//! failure comes back as [`Error::Selection`](crate::Error::Selection), which
//! callers treat as a degraded but renderable outcome.

use crate::{
    Result,
    auth::{AccessToken, OAuthClient, TokenCache},
    config::Settings,
    provider::{AssetLister, NetworkManager, VodApiClient},
    vod::{self, SelectedVod},
};
use std::sync::Arc;

/// Request-level orchestration over the token cache and asset listing
#[derive(Debug)]
pub struct VodPortal {
    tokens: TokenCache,
    lister: Arc<dyn AssetLister>,
    subdomain: String,
}

impl VodPortal {
    /// Assemble a portal from its collaborators
    pub fn new(
        tokens: TokenCache,
        lister: Arc<dyn AssetLister>,
        subdomain: impl Into<String>,
    ) -> Self {
        Self {
            tokens,
            lister,
            subdomain: subdomain.into(),
        }
    }

    /// Build the production wiring: one shared reqwest client, the OAuth
    /// exchange behind a token cache, and the provider asset listing.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let network = NetworkManager::new(settings)?;
        let client = network.client().clone();

        let fetcher = OAuthClient::from_settings(client.clone(), &settings.provider);
        let lister = VodApiClient::from_settings(client, &settings.provider);

        tracing::debug!(
            "Portal wired: token_url={}, assets_url={}",
            fetcher.token_url(),
            lister.assets_url()
        );

        Ok(Self::new(
            TokenCache::new(Arc::new(fetcher)),
            Arc::new(lister),
            settings.provider.subdomain.clone(),
        ))
    }

    /// Configured provider subdomain
    pub fn subdomain(&self) -> &str {
        &self.subdomain
    }

    /// Underlying token cache
    pub fn token_cache(&self) -> &TokenCache {
        &self.tokens
    }

    /// Valid bearer token, fetched only when the cached one has expired
    pub async fn access_token(&self) -> Result<AccessToken> {
        self.tokens.get().await
    }

    /// Resolve the featured VOD for a page render
    pub async fn featured_vod(&self) -> Result<SelectedVod> {
        let token = self.tokens.get().await?;
        let assets = self.lister.list_recent(&token).await?;

        match vod::select(&assets) {
            Ok(selected) => {
                tracing::debug!("Selected '{}' out of {} assets", selected.title, assets.len());
                Ok(selected)
            }
            Err(e) => {
                tracing::warn!("{} ({} assets listed)", e, assets.len());
                Err(e.into())
            }
        }
    }
}
