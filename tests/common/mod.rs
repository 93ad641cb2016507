//! Common test utilities and helpers
//!
//! Fake provider endpoints on a wiremock server plus asset JSON builders.

#![allow(dead_code)]

use serde_json::{Value, json};
use vodkit_portal::config::Settings;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{header, method, path, query_param},
};

pub const TOKEN_PATH: &str = "/oauth/token";
pub const ASSETS_PATH: &str = "/vod/v1/assets";

/// Test configuration factory
pub struct TestConfig;

impl TestConfig {
    /// Settings with credentials filled in and both provider URLs pointing at
    /// the mock server
    pub fn for_mock(server: &MockServer) -> Settings {
        let mut settings = Settings::default();
        settings.provider.client_id = "portal-client".to_string();
        settings.provider.client_secret = "portal-secret".to_string();
        settings.provider.subdomain = "acme".to_string();
        settings.provider.oauth_url = format!("{}{}", server.uri(), TOKEN_PATH);
        settings.provider.api_base_url = server.uri();
        settings.network.connect_timeout = 5;
        settings.network.request_timeout = 5;
        settings
    }
}

/// Test data factory for provider JSON
pub struct MockData;

impl MockData {
    pub fn token(access_token: &str, expires_in: u64) -> Value {
        json!({
            "access_token": access_token,
            "token_type": "Bearer",
            "expires_in": expires_in,
        })
    }

    pub fn endpoint(format: &str, protection: &str, access_type: &str, url: &str) -> Value {
        json!({
            "format": format,
            "protection": protection,
            "accessType": access_type,
            "url": url,
        })
    }

    /// Asset with a single clear HLS output
    pub fn playable(title: &str, url: &str) -> Value {
        Self::asset(title, vec![vec![Self::endpoint("HLS", "None", "Http", url)]])
    }

    /// Asset whose only output is DRM protected
    pub fn protected(title: &str) -> Value {
        Self::asset(
            title,
            vec![vec![Self::endpoint(
                "HLS",
                "Widevine",
                "Http",
                "https://cdn.example/drm.m3u8",
            )]],
        )
    }

    pub fn asset(title: &str, outputs: Vec<Vec<Value>>) -> Value {
        let outputs: Vec<Value> = outputs
            .into_iter()
            .map(|endpoints| json!({ "endpoints": endpoints }))
            .collect();
        json!({ "title": title, "outputs": outputs })
    }

    pub fn page(items: Vec<Value>) -> Value {
        json!({ "items": items })
    }
}

/// Mock server factory
pub struct MockServerFactory;

impl MockServerFactory {
    pub async fn new() -> MockServer {
        MockServer::start().await
    }

    /// Token endpoint answering every call with the same grant
    pub async fn setup_token(server: &MockServer, access_token: &str, expires_in: u64) {
        Mock::given(method("POST"))
            .and(path(TOKEN_PATH))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(MockData::token(access_token, expires_in)),
            )
            .mount(server)
            .await;
    }

    /// Token endpoint that must be hit exactly `times` times
    pub async fn setup_token_expecting(
        server: &MockServer,
        access_token: &str,
        expires_in: u64,
        times: u64,
    ) {
        Mock::given(method("POST"))
            .and(path(TOKEN_PATH))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(MockData::token(access_token, expires_in)),
            )
            .expect(times)
            .mount(server)
            .await;
    }

    pub async fn setup_token_failure(server: &MockServer, status: u16) {
        Mock::given(method("POST"))
            .and(path(TOKEN_PATH))
            .respond_with(ResponseTemplate::new(status).set_body_string("invalid_client"))
            .mount(server)
            .await;
    }

    /// Asset listing that only answers requests carrying `access_token`
    pub async fn setup_assets(server: &MockServer, access_token: &str, items: Vec<Value>) {
        Mock::given(method("GET"))
            .and(path(ASSETS_PATH))
            .and(query_param("limit", "5"))
            .and(query_param("sort", "lastModificationDate"))
            .and(query_param("desc", "true"))
            .and(header(
                "authorization",
                format!("Bearer {}", access_token).as_str(),
            ))
            .respond_with(ResponseTemplate::new(200).set_body_json(MockData::page(items)))
            .mount(server)
            .await;
    }

    pub async fn setup_assets_failure(server: &MockServer, status: u16) {
        Mock::given(method("GET"))
            .and(path(ASSETS_PATH))
            .respond_with(ResponseTemplate::new(status).set_body_string("unavailable"))
            .mount(server)
            .await;
    }
}

/// Test utilities
pub struct TestUtils;

impl TestUtils {
    /// Initialize test logging
    pub fn init_logger() {
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_env_filter("debug")
            .try_init();
    }
}
