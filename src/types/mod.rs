//! Type definitions for the portal
//!
//! Provider asset records and the JSON bodies the server emits.

pub mod asset;
pub mod response;

pub use asset::{AccessType, Asset, AssetPage, Endpoint, Output, Protection, StreamFormat};
pub use response::{ErrorResponse, PingResponse};
