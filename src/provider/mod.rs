//! VOD provider API access
//!
//! Shared HTTP client setup and the recent-assets listing.

pub mod assets;
pub mod network;

pub use assets::{AssetLister, VodApiClient};
pub use network::NetworkManager;
