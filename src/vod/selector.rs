//! Featured VOD selection
//!
//! Picks the first asset in listing order that has an output made only of
//! unprotected endpoints with at least one HLS endpoint, then reads the HTTP
//! HLS manifest from that asset's first output.
//!
//! Eligibility looks at every output but the manifest is only taken from
//! `outputs[0]`. An asset whose qualifying output is not the first one is
//! still selected and then reported as [`SelectionError::NoManifestUrl`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::Asset;

/// Asset chosen for playback
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectedVod {
    pub title: String,
    pub manifest_url: String,
}

/// Why no playable VOD could be offered
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    /// Nothing in the listing is playable without protection
    #[error("No eligible asset: no unprotected HLS output in the listing")]
    NoEligibleAsset,

    /// An asset qualified but its first output has no HTTP HLS endpoint
    #[error("No manifest URL: asset '{title}' has no HTTP HLS endpoint in its first output")]
    NoManifestUrl {
        /// Title of the selected asset
        title: String,
    },
}

/// True if any output of the asset is fully unprotected and carries HLS
pub fn is_eligible(asset: &Asset) -> bool {
    asset.outputs.iter().any(|output| output.is_unprotected_hls())
}

/// First eligible asset in input order
pub fn first_eligible(assets: &[Asset]) -> Option<&Asset> {
    assets.iter().find(|asset| is_eligible(asset))
}

/// URL of the first HTTP HLS endpoint in the asset's first output
pub fn hls_manifest_url(asset: &Asset) -> Option<&str> {
    asset
        .outputs
        .first()?
        .endpoints
        .iter()
        .find(|endpoint| endpoint.is_http_hls())
        .map(|endpoint| endpoint.url.as_str())
}

/// Select the featured VOD from an already sorted listing
pub fn select(assets: &[Asset]) -> Result<SelectedVod, SelectionError> {
    let asset = first_eligible(assets).ok_or(SelectionError::NoEligibleAsset)?;

    let manifest_url =
        hls_manifest_url(asset).ok_or_else(|| SelectionError::NoManifestUrl {
            title: asset.title.clone(),
        })?;

    Ok(SelectedVod {
        title: asset.title.clone(),
        manifest_url: manifest_url.to_string(),
    })
}
