//! Command-line entry points
//!
//! `server` runs the HTTP portal; the default mode resolves the featured VOD
//! once and prints it as JSON.

pub mod resolve;
pub mod server;

use crate::config::{ConfigLoader, Settings};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Build the log filter.
///
/// Precedence: `--verbose` > `RUST_LOG` > `logging.level` from settings.
pub fn log_filter(verbose: bool, configured_level: &str) -> EnvFilter {
    if verbose {
        EnvFilter::new("debug")
    } else if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::new(configured_level)
    }
}

/// Install the global subscriber, writing to stderr so stdout stays clean
/// for resolve-mode JSON. A second call is a no-op.
pub fn init_logging(verbose: bool, configured_level: &str) {
    let _ = tracing_subscriber::registry()
        .with(log_filter(verbose, configured_level))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

/// Config path: CLI arg > VODKIT_CONFIG > default location
pub(crate) fn config_path(cli_config: Option<&str>) -> Option<PathBuf> {
    match cli_config {
        Some(path) => Some(PathBuf::from(path)),
        None => ConfigLoader::get_config_path(),
    }
}

/// Load `.env`, then the file and environment layers, without validating.
pub(crate) fn load_unvalidated_settings(cli_config: Option<&str>) -> crate::Result<Settings> {
    ConfigLoader::load_dotenv();
    let path = config_path(cli_config);
    ConfigLoader::new().load_unvalidated(path.as_deref())
}

/// Load `.env`, then the file and environment layers, and validate.
pub(crate) fn load_settings(cli_config: Option<&str>) -> crate::Result<Settings> {
    let settings = load_unvalidated_settings(cli_config)?;
    settings.validate()?;
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ENV_TEST_MUTEX;

    fn rendered(filter: &EnvFilter) -> String {
        format!("{:?}", filter).to_lowercase()
    }

    #[test]
    fn test_configured_level_used_without_overrides() {
        let _lock = ENV_TEST_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
        let original = std::env::var("RUST_LOG").ok();
        unsafe {
            std::env::remove_var("RUST_LOG");
        }

        let filter = log_filter(false, "error");
        assert!(rendered(&filter).contains("error"));

        unsafe {
            if let Some(value) = original {
                std::env::set_var("RUST_LOG", value);
            }
        }
    }

    #[test]
    fn test_rust_log_overrides_configured_level() {
        let _lock = ENV_TEST_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
        let original = std::env::var("RUST_LOG").ok();
        unsafe {
            std::env::set_var("RUST_LOG", "warn");
        }

        let filter = log_filter(false, "error");
        assert!(rendered(&filter).contains("warn"));

        unsafe {
            std::env::remove_var("RUST_LOG");
            if let Some(value) = original {
                std::env::set_var("RUST_LOG", value);
            }
        }
    }

    #[test]
    fn test_verbose_takes_highest_precedence() {
        let _lock = ENV_TEST_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
        let original = std::env::var("RUST_LOG").ok();
        unsafe {
            std::env::set_var("RUST_LOG", "warn");
        }

        let filter = log_filter(true, "error");
        assert!(rendered(&filter).contains("debug"));

        unsafe {
            std::env::remove_var("RUST_LOG");
            if let Some(value) = original {
                std::env::set_var("RUST_LOG", value);
            }
        }
    }

    #[test]
    fn test_cli_config_path_wins() {
        let path = config_path(Some("/etc/vodkit/portal.toml"));
        assert_eq!(path, Some(PathBuf::from("/etc/vodkit/portal.toml")));
    }
}
