//! Error classification for the portal
//!
//! Upstream failures (credential exchange, asset listing) abort a page
//! render. Selection failures are soft: the page still renders unpopulated.

use thiserror::Error;

use crate::vod::SelectionError;

/// Main error type for the application
#[derive(Debug, Error)]
pub enum Error {
    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid configuration value
    #[error("Configuration error in {field}: {message}")]
    Config {
        /// The configuration field that has an error
        field: String,
        /// Error message describing the issue
        message: String,
    },

    /// Required configuration value absent; the server must not start
    #[error("Missing required configuration: {field}")]
    ConfigurationMissing {
        /// Name of the missing setting
        field: String,
    },

    /// OAuth client-credentials exchange failed
    #[error("Credential fetch failed: {reason}")]
    CredentialFetch {
        /// What went wrong
        reason: String,
        /// Upstream HTTP status, when a response arrived
        status: Option<u16>,
    },

    /// Asset listing call failed
    #[error("Asset listing failed: {reason}")]
    AssetList {
        /// What went wrong
        reason: String,
        /// Upstream HTTP status, when a response arrived
        status: Option<u16>,
    },

    /// No playable asset or no manifest in the listing
    #[error(transparent)]
    Selection(#[from] SelectionError),

    /// Page template could not be loaded
    #[error("Template error for {page}: {message}")]
    Template {
        /// Template file name
        page: String,
        /// Error message describing the issue
        message: String,
    },

    /// Generic internal errors
    #[error("Internal error: {message}")]
    Internal {
        /// Error message describing the internal issue
        message: String,
    },
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a configuration error
    pub fn config<S: Into<String>>(field: S, message: S) -> Self {
        Self::Config {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a missing configuration error
    pub fn configuration_missing(field: impl Into<String>) -> Self {
        Self::ConfigurationMissing {
            field: field.into(),
        }
    }

    /// Create a credential fetch error
    pub fn credential_fetch(reason: impl Into<String>, status: Option<u16>) -> Self {
        Self::CredentialFetch {
            reason: reason.into(),
            status,
        }
    }

    /// Create an asset listing error
    pub fn asset_list(reason: impl Into<String>, status: Option<u16>) -> Self {
        Self::AssetList {
            reason: reason.into(),
            status,
        }
    }

    /// Create a template error
    pub fn template<S: Into<String>>(page: S, message: S) -> Self {
        Self::Template {
            page: page.into(),
            message: message.into(),
        }
    }

    /// Create an internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// True for outcomes where the page should still render with its
    /// placeholders left in place.
    pub fn is_degraded(&self) -> bool {
        matches!(self, Error::Selection(..))
    }

    /// True for failures of an outbound call to the VOD provider
    pub fn is_upstream(&self) -> bool {
        matches!(self, Error::CredentialFetch { .. } | Error::AssetList { .. })
    }

    /// Get error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            Error::Json(..) => "json",
            Error::Io(..) => "io",
            Error::Config { .. } => "config",
            Error::ConfigurationMissing { .. } => "config",
            Error::CredentialFetch { .. } => "credential_fetch",
            Error::AssetList { .. } => "asset_list",
            Error::Selection(SelectionError::NoEligibleAsset) => "no_eligible_asset",
            Error::Selection(SelectionError::NoManifestUrl { .. }) => "no_manifest_url",
            Error::Template { .. } => "template",
            Error::Internal { .. } => "internal",
        }
    }
}
