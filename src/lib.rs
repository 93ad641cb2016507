//! VOD portal
//!
//! A small web portal in front of a hosted video-on-demand service. It keeps
//! an OAuth2 client-credentials token cached until it expires, picks the most
//! recent asset that can be played as unprotected HLS, and serves HTML pages
//! with the manifest URL, title and bearer token substituted in.
//!
//! # Architecture
//!
//! - [`auth`]: token cache over the client-credentials exchange
//! - [`provider`]: HTTP client and the asset listing endpoint
//! - [`vod`]: featured asset selection
//! - [`pages`]: template loading and placeholder substitution
//! - [`portal`]: per-request orchestration
//! - [`server`]: axum routes
//!
//! # Usage
//!
//! ```bash
//! vodkit-portal server --port 8080
//! ```
//!
//! # Examples
//!
//! ```rust
//! use vodkit_portal::{Settings, VodPortal};
//!
//! # fn example() -> vodkit_portal::Result<()> {
//! let mut settings = Settings::default();
//! settings.provider.subdomain = "acme".to_string();
//! let portal = VodPortal::from_settings(&settings)?;
//! assert_eq!(portal.subdomain(), "acme");
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod cli;
pub mod config;
pub mod error;
pub mod pages;
pub mod portal;
pub mod provider;
pub mod server;
pub mod types;
pub mod utils;
pub mod vod;

pub use auth::{AccessToken, TokenCache};
pub use config::{ConfigLoader, Settings};
pub use error::{Error, Result};
pub use pages::{Page, PageComposer, Placeholder};
pub use portal::VodPortal;
pub use types::{Asset, ErrorResponse, PingResponse};
pub use vod::{SelectedVod, SelectionError};
