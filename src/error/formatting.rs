//! Error formatting utilities
//!
//! Renders errors together with their source chain for HTTP error bodies
//! and structured log records.

use crate::Error;
use std::error::Error as StdError;

/// Format error for display, appending nested causes
pub fn format_error(error: &Error) -> String {
    let formatted = match error {
        Error::CredentialFetch {
            reason,
            status: Some(status),
        } => format!("Credential fetch failed (HTTP {}): {}", status, reason),

        Error::AssetList {
            reason,
            status: Some(status),
        } => format!("Asset listing failed (HTTP {}): {}", status, reason),

        Error::ConfigurationMissing { field } => {
            format!("Missing required configuration: {} (fill the .env file)", field)
        }

        _ => error.to_string(),
    };

    let mut result = formatted;
    let mut source = error.source();

    while let Some(cause) = source {
        if !result.contains(&cause.to_string()) {
            result = format!("{} (caused by {})", result, cause);
        }
        source = cause.source();
    }

    result
}

/// Format error for logging with structured data
pub fn format_error_for_logging(error: &Error) -> serde_json::Value {
    let mut log_data = serde_json::json!({
        "message": format_error(error),
        "category": error.category(),
        "degraded": error.is_degraded(),
    });

    match error {
        Error::CredentialFetch {
            status: Some(status),
            ..
        }
        | Error::AssetList {
            status: Some(status),
            ..
        } => {
            log_data["upstream_status"] = serde_json::Value::Number((*status).into());
        }
        Error::Template { page, .. } => {
            log_data["page"] = serde_json::Value::String(page.clone());
        }
        _ => {}
    }

    log_data
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credential_error_with_status() {
        let error = Error::credential_fetch("invalid_client", Some(401));
        let formatted = format_error(&error);

        assert!(formatted.contains("HTTP 401"));
        assert!(formatted.contains("invalid_client"));
    }

    #[test]
    fn test_nested_error_formatting() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let wrapped_error = Error::Io(io_error);

        let formatted = format_error(&wrapped_error);
        assert!(formatted.contains("File not found"));
    }

    #[test]
    fn test_missing_configuration_hint() {
        let error = Error::configuration_missing("CLIENT_SECRET");
        let formatted = format_error(&error);

        assert!(formatted.contains("CLIENT_SECRET"));
        assert!(formatted.contains(".env"));
    }

    #[test]
    fn test_logging_error_formatting() {
        let error = Error::asset_list("unauthorized", Some(403));
        let log_data = format_error_for_logging(&error);

        assert_eq!(log_data["category"].as_str().unwrap(), "asset_list");
        assert_eq!(log_data["upstream_status"].as_u64().unwrap(), 403);
        assert!(!log_data["degraded"].as_bool().unwrap());
    }
}
