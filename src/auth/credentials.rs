//! OAuth2 client-credentials exchange
//!
//! Posts `client_id`, `client_secret` and `grant_type=client_credentials`
//! as a form body and expects `{"access_token": .., "expires_in": ..}` back.

use crate::{Result, config::settings::ProviderSettings};
use reqwest::Client;
use serde::Deserialize;

/// Raw token returned by the authorization server
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct CredentialGrant {
    pub access_token: String,
    /// Lifetime in seconds
    pub expires_in: u64,
}

impl std::fmt::Debug for CredentialGrant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialGrant")
            .field("access_token", &"<redacted>")
            .field("expires_in", &self.expires_in)
            .finish()
    }
}

/// Trait for the credential exchange so the token cache can be tested with fakes
#[async_trait::async_trait]
pub trait CredentialFetcher: Send + Sync + std::fmt::Debug {
    /// Perform one exchange. No retries.
    async fn fetch_credentials(&self) -> Result<CredentialGrant>;
}

/// reqwest-backed client-credentials exchange
#[derive(Clone)]
pub struct OAuthClient {
    client: Client,
    token_url: String,
    client_id: String,
    client_secret: String,
}

impl OAuthClient {
    pub fn new(
        client: Client,
        token_url: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        Self {
            client,
            token_url: token_url.into(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }

    pub fn from_settings(client: Client, provider: &ProviderSettings) -> Self {
        Self::new(
            client,
            provider.oauth_url.clone(),
            provider.client_id.clone(),
            provider.client_secret.clone(),
        )
    }

    pub fn token_url(&self) -> &str {
        &self.token_url
    }
}

impl std::fmt::Debug for OAuthClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OAuthClient")
            .field("token_url", &self.token_url)
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

#[async_trait::async_trait]
impl CredentialFetcher for OAuthClient {
    async fn fetch_credentials(&self) -> Result<CredentialGrant> {
        let form = [
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
            ("grant_type", "client_credentials"),
        ];

        tracing::debug!("Requesting access token from {}", self.token_url);

        let response = self
            .client
            .post(&self.token_url)
            .form(&form)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to send credential request: {}", e);
                crate::Error::credential_fetch(format!("Network request failed: {}", e), None)
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!("Authorization server returned error status: {}", status);
            return Err(crate::Error::credential_fetch(
                format!("Token endpoint returned {}: {}", status, truncate(&body, 200)),
                Some(status.as_u16()),
            ));
        }

        let grant: CredentialGrant = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse token response: {}", e);
            crate::Error::credential_fetch(
                format!("Malformed token response: {}", e),
                Some(status.as_u16()),
            )
        })?;

        if grant.access_token.is_empty() {
            return Err(crate::Error::credential_fetch(
                "Token response carried an empty access_token",
                Some(status.as_u16()),
            ));
        }

        Ok(grant)
    }
}

fn truncate(body: &str, max: usize) -> &str {
    match body.char_indices().nth(max) {
        Some((idx, _)) => &body[..idx],
        None => body,
    }
}
