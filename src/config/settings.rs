//! Configuration settings
//!
//! Settings come from a TOML file, environment variables (optionally seeded
//! from a `.env` file) and command-line overrides.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Placeholder in `api_base_url` replaced by the configured subdomain
pub const SUBDOMAIN_MARKER: &str = "{subdomain}";

// Helper functions for serde defaults
fn default_host() -> String {
    "::".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_oauth_url() -> String {
    "https://auth.videokit.cloud/oauth/token".to_string()
}

fn default_api_base_url() -> String {
    format!("https://{}.api.videokit.cloud", SUBDOMAIN_MARKER)
}

fn default_asset_limit() -> u32 {
    5
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_request_timeout() -> u64 {
    30
}

fn default_user_agent() -> String {
    crate::utils::user_agent()
}

/// Main configuration settings for the portal
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    /// Server configuration
    #[serde(default)]
    pub server: ServerSettings,
    /// VOD provider credentials and endpoints
    #[serde(default)]
    pub provider: ProviderSettings,
    /// Network configuration
    #[serde(default)]
    pub network: NetworkSettings,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingSettings,
    /// Page template configuration
    #[serde(default)]
    pub pages: PageSettings,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,
    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

/// VOD provider account and endpoints
#[derive(Clone, Serialize, Deserialize)]
pub struct ProviderSettings {
    /// OAuth client id (CLIENT_ID)
    #[serde(default)]
    pub client_id: String,
    /// OAuth client secret (CLIENT_SECRET)
    #[serde(default)]
    pub client_secret: String,
    /// Tenant subdomain on the provider (CLIENT_SUBDOMAIN)
    #[serde(default)]
    pub subdomain: String,
    /// Client-credentials token endpoint
    #[serde(default = "default_oauth_url")]
    pub oauth_url: String,
    /// API base URL; `{subdomain}` is substituted
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    /// Number of most recent assets to request
    #[serde(default = "default_asset_limit")]
    pub asset_limit: u32,
}

/// Network configuration for outbound calls
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkSettings {
    /// HTTPS proxy URL
    #[serde(default)]
    pub https_proxy: Option<String>,
    /// HTTP proxy URL
    #[serde(default)]
    pub http_proxy: Option<String>,
    /// All protocols proxy URL
    #[serde(default)]
    pub all_proxy: Option<String>,
    /// Connection timeout in seconds
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout: u64,
    /// Request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout: u64,
    /// User agent string
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Enable verbose logging
    #[serde(default)]
    pub verbose: bool,
}

/// Page template configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PageSettings {
    /// Directory with template overrides; built-in pages are used when unset
    /// or when a file is missing
    #[serde(default)]
    pub template_dir: Option<PathBuf>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            client_id: String::new(),
            client_secret: String::new(),
            subdomain: String::new(),
            oauth_url: default_oauth_url(),
            api_base_url: default_api_base_url(),
            asset_limit: default_asset_limit(),
        }
    }
}

impl std::fmt::Debug for ProviderSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let secret = if self.client_secret.is_empty() {
            ""
        } else {
            "<redacted>"
        };
        f.debug_struct("ProviderSettings")
            .field("client_id", &self.client_id)
            .field("client_secret", &secret)
            .field("subdomain", &self.subdomain)
            .field("oauth_url", &self.oauth_url)
            .field("api_base_url", &self.api_base_url)
            .field("asset_limit", &self.asset_limit)
            .finish()
    }
}

impl ProviderSettings {
    /// API base URL with the subdomain filled in, without trailing slash
    pub fn resolved_api_base_url(&self) -> String {
        self.api_base_url
            .replace(SUBDOMAIN_MARKER, &self.subdomain)
            .trim_end_matches('/')
            .to_string()
    }
}

impl Default for NetworkSettings {
    fn default() -> Self {
        Self {
            https_proxy: None,
            http_proxy: None,
            all_proxy: None,
            connect_timeout: default_connect_timeout(),
            request_timeout: default_request_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            verbose: false,
        }
    }
}

/// Parse a boolean flag as commonly written in `.env` files
fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn env_non_empty(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

impl Settings {
    /// Create new settings with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load settings from environment variables on top of defaults
    pub fn from_env() -> crate::Result<Self> {
        Self::default().merge_with_env()
    }

    /// Load settings from configuration file
    pub fn from_file<P: AsRef<std::path::Path>>(path: P) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            crate::Error::config("file", &format!("Failed to read config file: {}", e))
        })?;

        let settings: Settings = toml::from_str(&content).map_err(|e| {
            crate::Error::config("file", &format!("Failed to parse config file: {}", e))
        })?;

        Ok(settings)
    }

    /// Apply environment variable overrides; unset or empty variables keep
    /// the current value
    pub fn merge_with_env(mut self) -> crate::Result<Self> {
        if let Some(host) = env_non_empty("LISTEN_HOST") {
            self.server.host = host;
        }

        if let Some(port) = env_non_empty("PORT") {
            self.server.port = port
                .parse()
                .map_err(|e| crate::Error::config("PORT", &format!("Invalid port: {}", e)))?;
        }

        if let Some(client_id) = env_non_empty("CLIENT_ID") {
            self.provider.client_id = client_id;
        }
        if let Some(client_secret) = env_non_empty("CLIENT_SECRET") {
            self.provider.client_secret = client_secret;
        }
        if let Some(subdomain) = env_non_empty("CLIENT_SUBDOMAIN") {
            self.provider.subdomain = subdomain;
        }
        if let Some(oauth_url) = env_non_empty("OAUTH_URL") {
            self.provider.oauth_url = oauth_url;
        }
        if let Some(api_base_url) = env_non_empty("VOD_API_BASE_URL") {
            self.provider.api_base_url = api_base_url;
        }

        if let Some(dir) = env_non_empty("TEMPLATE_DIR") {
            self.pages.template_dir = Some(PathBuf::from(dir));
        }

        if let Some(proxy) = env_non_empty("HTTPS_PROXY") {
            self.network.https_proxy = Some(proxy);
        }
        if let Some(proxy) = env_non_empty("HTTP_PROXY") {
            self.network.http_proxy = Some(proxy);
        }
        if let Some(proxy) = env_non_empty("ALL_PROXY") {
            self.network.all_proxy = Some(proxy);
        }

        if let Some(level) = env_non_empty("LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(verbose) = env_non_empty("VERBOSE") {
            self.logging.verbose = parse_flag(&verbose).ok_or_else(|| {
                crate::Error::config("VERBOSE", &format!("Invalid boolean: {}", verbose))
            })?;
        }

        Ok(self)
    }

    /// Get effective proxy URL based on priority
    pub fn get_proxy_url(&self) -> Option<String> {
        self.network
            .https_proxy
            .as_ref()
            .or(self.network.http_proxy.as_ref())
            .or(self.network.all_proxy.as_ref())
            .cloned()
    }

    /// Check that the three provider credentials are present
    pub fn require_credentials(&self) -> crate::Result<()> {
        for (name, value) in [
            ("CLIENT_ID", &self.provider.client_id),
            ("CLIENT_SECRET", &self.provider.client_secret),
            ("CLIENT_SUBDOMAIN", &self.provider.subdomain),
        ] {
            if value.trim().is_empty() {
                return Err(crate::Error::configuration_missing(name));
            }
        }
        Ok(())
    }

    /// Validate configuration settings
    pub fn validate(&self) -> crate::Result<()> {
        self.require_credentials()?;

        if self.server.port == 0 {
            return Err(crate::Error::config(
                "port",
                "Invalid server port: cannot be 0",
            ));
        }

        if self.provider.asset_limit == 0 {
            return Err(crate::Error::config(
                "asset_limit",
                "Invalid asset limit: cannot be 0",
            ));
        }

        match self.logging.level.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(crate::Error::config(
                    "log_level",
                    &format!("Invalid log level: {}", self.logging.level),
                ));
            }
        }

        for (name, url_str) in [
            ("oauth_url", self.provider.oauth_url.clone()),
            ("api_base_url", self.provider.resolved_api_base_url()),
        ] {
            if let Err(e) = url::Url::parse(&url_str) {
                return Err(crate::Error::config(
                    name,
                    &format!("Invalid URL '{}': {}", url_str, e),
                ));
            }
        }

        for (name, proxy_url) in [
            ("https_proxy", &self.network.https_proxy),
            ("http_proxy", &self.network.http_proxy),
            ("all_proxy", &self.network.all_proxy),
        ] {
            if let Some(url_str) = proxy_url
                && let Err(e) = url::Url::parse(url_str)
            {
                return Err(crate::Error::config(
                    name,
                    &format!("Invalid proxy URL '{}': {}", url_str, e),
                ));
            }
        }

        Ok(())
    }
}
