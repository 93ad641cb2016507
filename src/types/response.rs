//! Response type definitions
//!
//! JSON bodies for the health check and for upstream failures.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Ping response for health checks
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PingResponse {
    /// Server uptime in seconds
    pub server_uptime: u64,

    /// Server version
    pub version: String,
}

impl PingResponse {
    /// Create a new ping response
    pub fn new(server_uptime: u64, version: impl Into<String>) -> Self {
        Self {
            server_uptime,
            version: version.into(),
        }
    }
}

/// Error body returned when a page cannot be rendered
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,

    /// Optional error context
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,

    /// Error timestamp
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,

    /// Service version
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl ErrorResponse {
    /// Create a new error response
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            context: None,
            timestamp: Some(Utc::now()),
            version: Some(crate::utils::version::get_version().to_string()),
        }
    }

    /// Create error response with context
    pub fn with_context(error: impl Into<String>, context: impl Into<String>) -> Self {
        Self {
            context: Some(context.into()),
            ..Self::new(error)
        }
    }

    /// Build a response from an application error, using its category as context
    pub fn from_error(error: &crate::Error) -> Self {
        Self::with_context(crate::error::format_error(error), error.category())
    }
}
