//! VOD asset records as returned by the provider's asset listing
//!
//! The provider exposes the display title either as a top-level `title`
//! field or as `metadata.FriendlyName`; both land in [`Asset::title`].

use serde::{Deserialize, Deserializer, Serialize};

/// Streaming packaging of an endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum StreamFormat {
    #[serde(rename = "HLS")]
    Hls,
    #[serde(rename = "DASH")]
    Dash,
    #[serde(rename = "MP4")]
    Mp4,
    #[default]
    #[serde(other)]
    Other,
}

/// Content protection applied to an endpoint
///
/// Anything the provider reports other than `None` counts as protected,
/// including values this crate does not know about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Protection {
    None,
    ClearKey,
    Widevine,
    PlayReady,
    FairPlay,
    #[default]
    #[serde(other)]
    Other,
}

/// How an endpoint is delivered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AccessType {
    Http,
    #[default]
    #[serde(other)]
    Other,
}

/// A deliverable URL for one output
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Endpoint {
    #[serde(default, deserialize_with = "null_as_default")]
    pub format: StreamFormat,
    #[serde(default, deserialize_with = "null_as_default")]
    pub protection: Protection,
    #[serde(default, deserialize_with = "null_as_default")]
    pub access_type: AccessType,
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
}

impl Endpoint {
    pub fn new(
        format: StreamFormat,
        protection: Protection,
        access_type: AccessType,
        url: impl Into<String>,
    ) -> Self {
        Self {
            format,
            protection,
            access_type,
            url: url.into(),
        }
    }

    pub fn is_unprotected(&self) -> bool {
        self.protection == Protection::None
    }

    pub fn is_hls(&self) -> bool {
        self.format == StreamFormat::Hls
    }

    /// Plain HTTP HLS manifest, the only kind the bundled player loads
    pub fn is_http_hls(&self) -> bool {
        self.access_type == AccessType::Http && self.is_hls()
    }
}

/// One encoding/packaging of an asset
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Output {
    #[serde(default, deserialize_with = "null_as_default")]
    pub endpoints: Vec<Endpoint>,
}

impl Output {
    pub fn new(endpoints: Vec<Endpoint>) -> Self {
        Self { endpoints }
    }

    /// Every endpoint is unprotected and at least one is HLS.
    ///
    /// An output without endpoints never qualifies.
    pub fn is_unprotected_hls(&self) -> bool {
        self.endpoints.iter().all(Endpoint::is_unprotected)
            && self.endpoints.iter().any(Endpoint::is_hls)
    }
}

/// A provider-side VOD record
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "RawAsset")]
pub struct Asset {
    pub title: String,
    pub outputs: Vec<Output>,
}

impl Asset {
    pub fn new(title: impl Into<String>, outputs: Vec<Output>) -> Self {
        Self {
            title: title.into(),
            outputs,
        }
    }
}

#[derive(Deserialize)]
struct RawAsset {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    metadata: Option<RawMetadata>,
    #[serde(default, deserialize_with = "null_as_default")]
    outputs: Vec<Output>,
}

#[derive(Deserialize)]
struct RawMetadata {
    #[serde(rename = "FriendlyName", default)]
    friendly_name: Option<String>,
}

impl From<RawAsset> for Asset {
    fn from(raw: RawAsset) -> Self {
        let title = raw
            .title
            .filter(|t| !t.is_empty())
            .or_else(|| raw.metadata.and_then(|m| m.friendly_name))
            .unwrap_or_default();

        Self {
            title,
            outputs: raw.outputs,
        }
    }
}

/// Page of assets returned by the listing endpoint
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AssetPage {
    #[serde(default, deserialize_with = "null_as_default")]
    pub items: Vec<Asset>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_title_from_friendly_name() {
        let asset: Asset = serde_json::from_value(json!({
            "metadata": { "FriendlyName": "Launch keynote" },
            "outputs": []
        }))
        .unwrap();

        assert_eq!(asset.title, "Launch keynote");
    }

    #[test]
    fn test_direct_title_wins_over_metadata() {
        let asset: Asset = serde_json::from_value(json!({
            "title": "Direct",
            "metadata": { "FriendlyName": "Friendly" }
        }))
        .unwrap();

        assert_eq!(asset.title, "Direct");
        assert!(asset.outputs.is_empty());
    }

    #[test]
    fn test_unknown_enum_values_fall_back() {
        let endpoint: Endpoint = serde_json::from_value(json!({
            "format": "SmoothStreaming",
            "protection": "SomeNewDrm",
            "accessType": "Cdn",
            "url": "https://cdn.example/x"
        }))
        .unwrap();

        assert_eq!(endpoint.format, StreamFormat::Other);
        assert_eq!(endpoint.protection, Protection::Other);
        assert_eq!(endpoint.access_type, AccessType::Other);
        assert!(!endpoint.is_unprotected());
    }

    #[test]
    fn test_missing_protection_counts_as_protected() {
        let endpoint: Endpoint = serde_json::from_value(json!({
            "format": "HLS",
            "accessType": "Http",
            "url": "https://cdn.example/x.m3u8"
        }))
        .unwrap();

        assert!(endpoint.is_http_hls());
        assert!(!endpoint.is_unprotected());
    }

    #[test]
    fn test_null_endpoint_fields_fall_back() {
        let endpoint: Endpoint = serde_json::from_value(json!({
            "format": "HLS",
            "protection": null,
            "accessType": null,
            "url": null
        }))
        .unwrap();

        assert_eq!(endpoint.protection, Protection::Other);
        assert_eq!(endpoint.access_type, AccessType::Other);
        assert!(endpoint.url.is_empty());
        assert!(!endpoint.is_unprotected());
    }

    #[test]
    fn test_null_collections_become_empty() {
        let page: AssetPage = serde_json::from_value(json!({
            "items": [ { "title": "a", "outputs": null } ]
        }))
        .unwrap();

        assert_eq!(page.items.len(), 1);
        assert!(page.items[0].outputs.is_empty());
    }

    #[test]
    fn test_empty_output_is_not_eligible() {
        assert!(!Output::default().is_unprotected_hls());
    }
}
