//! Axum application setup
//!
//! Creates and configures the Axum application with routes and middleware.

use crate::{Result, config::Settings, pages::PageComposer, portal::VodPortal};
use axum::{Router, routing::get};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Token cache and featured-VOD resolution
    pub portal: Arc<VodPortal>,
    /// Page template loader
    pub composer: Arc<PageComposer>,
    /// Application settings
    pub settings: Arc<Settings>,
    /// Server start time for uptime calculation
    pub start_time: std::time::Instant,
}

/// Create the main Axum application with production collaborators
pub fn create_app(settings: Settings) -> Result<Router> {
    let portal = VodPortal::from_settings(&settings)?;
    Ok(create_app_with_portal(settings, portal))
}

/// Create the application around an already assembled portal
pub fn create_app_with_portal(settings: Settings, portal: VodPortal) -> Router {
    let state = AppState {
        portal: Arc::new(portal),
        composer: Arc::new(PageComposer::from_settings(&settings.pages)),
        settings: Arc::new(settings),
        start_time: std::time::Instant::now(),
    };

    Router::new()
        .route("/", get(super::handlers::index))
        .route("/vod", get(super::handlers::vod_detail))
        .route("/upload", get(super::handlers::upload))
        .route("/ping", get(super::handlers::ping))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
