//! Process-wide access token cache
//!
//! Holds at most one bearer token. A token is served while `now < expires_at`;
//! once expired, the next caller performs exactly one credential exchange and
//! replaces the slot. Expiry is computed from the instant the exchange was
//! issued, so network latency never extends the usable lifetime.
//!
//! Concurrent misses are not coalesced: each performs its own exchange and
//! the last one to finish wins the slot. The slot is only written after an
//! exchange fully succeeds, so a failed or cancelled fetch leaves it as it was.

use crate::{
    Result,
    auth::{
        clock::{Clock, SystemClock},
        credentials::{CredentialFetcher, CredentialGrant},
    },
};
use chrono::{DateTime, TimeDelta, Utc};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Bearer token with its expiry instant
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken {
    value: String,
    expires_at: DateTime<Utc>,
}

impl AccessToken {
    pub fn new(value: impl Into<String>, expires_at: DateTime<Utc>) -> Self {
        Self {
            value: value.into(),
            expires_at,
        }
    }

    /// Build a token from a grant, counting its lifetime from `issued_at`
    pub fn from_grant(grant: CredentialGrant, issued_at: DateTime<Utc>) -> Result<Self> {
        let ttl = i64::try_from(grant.expires_in)
            .ok()
            .and_then(TimeDelta::try_seconds)
            .ok_or_else(|| {
                crate::Error::credential_fetch(
                    format!("expires_in out of range: {}", grant.expires_in),
                    None,
                )
            })?;

        let expires_at = issued_at.checked_add_signed(ttl).ok_or_else(|| {
            crate::Error::credential_fetch(
                format!("expires_in out of range: {}", grant.expires_in),
                None,
            )
        })?;

        Ok(Self::new(grant.access_token, expires_at))
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessToken")
            .field("value", &"<redacted>")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// Single-slot token cache with expiry-aware reuse
#[derive(Debug)]
pub struct TokenCache {
    fetcher: Arc<dyn CredentialFetcher>,
    clock: Arc<dyn Clock>,
    slot: RwLock<Option<AccessToken>>,
}

impl TokenCache {
    pub fn new(fetcher: Arc<dyn CredentialFetcher>) -> Self {
        Self::with_clock(fetcher, Arc::new(SystemClock))
    }

    pub fn with_clock(fetcher: Arc<dyn CredentialFetcher>, clock: Arc<dyn Clock>) -> Self {
        Self {
            fetcher,
            clock,
            slot: RwLock::new(None),
        }
    }

    /// Return the cached token if still valid, otherwise fetch a new one.
    ///
    /// On fetch failure the cached slot is left untouched and the error is
    /// returned to the caller.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use std::sync::Arc;
    /// # use vodkit_portal::auth::{CredentialFetcher, CredentialGrant, TokenCache};
    /// # #[derive(Debug)]
    /// # struct Fixed;
    /// # #[async_trait::async_trait]
    /// # impl CredentialFetcher for Fixed {
    /// #     async fn fetch_credentials(&self) -> vodkit_portal::Result<CredentialGrant> {
    /// #         Ok(CredentialGrant { access_token: "abc".into(), expires_in: 3600 })
    /// #     }
    /// # }
    /// # tokio_test::block_on(async {
    /// let cache = TokenCache::new(Arc::new(Fixed));
    ///
    /// let first = cache.get().await?;
    /// let second = cache.get().await?;
    /// assert_eq!(first, second);
    /// # Ok::<(), vodkit_portal::Error>(())
    /// # });
    /// ```
    pub async fn get(&self) -> Result<AccessToken> {
        let now = self.clock.now();
        if let Some(token) = self.slot.read().await.as_ref()
            && token.is_valid_at(now)
        {
            tracing::debug!("Using cached access token (expires at {})", token.expires_at);
            return Ok(token.clone());
        }

        let issued_at = self.clock.now();
        let grant = self.fetcher.fetch_credentials().await?;
        let expires_in = grant.expires_in;
        let token = AccessToken::from_grant(grant, issued_at)?;

        *self.slot.write().await = Some(token.clone());

        tracing::info!(
            "Fetched new access token: expires_in={}s, expires_at={}",
            expires_in,
            token.expires_at
        );
        Ok(token)
    }

    /// Currently stored token, valid or not, without fetching
    pub async fn peek(&self) -> Option<AccessToken> {
        self.slot.read().await.clone()
    }
}
