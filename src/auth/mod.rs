//! Access token acquisition and caching
//!
//! - [`credentials`]: the OAuth2 client-credentials exchange
//! - [`cache`]: the single-slot [`TokenCache`] in front of it
//! - [`clock`]: injectable time source so expiry can be driven in tests

pub mod cache;
pub mod clock;
pub mod credentials;

pub use cache::{AccessToken, TokenCache};
pub use clock::{Clock, ManualClock, SystemClock};
pub use credentials::{CredentialFetcher, CredentialGrant, OAuthClient};
