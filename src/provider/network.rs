//! Outbound HTTP client configuration
//!
//! One reqwest client is built at startup and shared by the credential
//! exchange and the asset listing.

use crate::{Result, config::Settings};
use reqwest::{Client, Proxy};
use std::time::Duration;

/// Network manager owning the shared HTTP client
#[derive(Debug, Clone)]
pub struct NetworkManager {
    /// Base HTTP client
    client: Client,
}

impl NetworkManager {
    /// Build the client from network settings and the effective proxy
    pub fn new(settings: &Settings) -> Result<Self> {
        let network = &settings.network;
        let mut client_builder = Client::builder()
            .user_agent(network.user_agent.clone())
            .connect_timeout(Duration::from_secs(network.connect_timeout))
            .timeout(Duration::from_secs(network.request_timeout));

        if let Some(proxy_url) = settings.get_proxy_url() {
            let proxy = Proxy::all(&proxy_url).map_err(|e| {
                crate::Error::config("proxy", &format!("Invalid proxy URL {}: {}", proxy_url, e))
            })?;
            tracing::debug!("Routing provider traffic through proxy {}", proxy_url);
            client_builder = client_builder.proxy(proxy);
        } else {
            // Proxy variables are already folded into settings
            client_builder = client_builder.no_proxy();
        }

        let client = client_builder.build().map_err(|e| {
            crate::Error::internal(format!("Failed to create HTTP client: {}", e))
        })?;

        Ok(Self { client })
    }

    /// Get the configured HTTP client
    pub fn client(&self) -> &Client {
        &self.client
    }
}
