//! HTTP request handlers
//!
//! Every page is a GET that renders a template. Upstream failures surface as
//! a JSON error body; a missing playable VOD renders the page unpopulated.

use crate::{
    pages::{Page, Placeholder},
    server::app::AppState,
    types::{ErrorResponse, PingResponse},
    utils::version,
    vod::SelectedVod,
};
use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

/// Home page
///
/// GET /
pub async fn index(State(state): State<AppState>) -> Response {
    render_featured(&state, Page::Index).await
}

/// VOD detail page
///
/// GET /vod
pub async fn vod_detail(State(state): State<AppState>) -> Response {
    render_featured(&state, Page::VodDetail).await
}

/// Upload page with the bearer token and subdomain injected
///
/// GET /upload
pub async fn upload(State(state): State<AppState>) -> Response {
    let token = match state.portal.access_token().await {
        Ok(token) => token,
        Err(e) => return error_response(&e),
    };

    let values = [
        (Placeholder::AccessToken, token.value()),
        (Placeholder::Subdomain, state.portal.subdomain()),
    ];

    match state.composer.render(Page::Upload, &values).await {
        Ok(html) => Html(html).into_response(),
        Err(e) => error_response(&e),
    }
}

/// Ping endpoint for health checks
///
/// GET /ping
///
/// Returns server status and uptime information.
pub async fn ping(State(state): State<AppState>) -> Json<PingResponse> {
    let uptime = state.start_time.elapsed().as_secs();
    let response = PingResponse::new(uptime, version::get_version());

    tracing::debug!(
        "Ping response: uptime={}s, version={}",
        uptime,
        version::get_version()
    );
    Json(response)
}

async fn render_featured(state: &AppState, page: Page) -> Response {
    let featured = match state.portal.featured_vod().await {
        Ok(vod) => Some(vod),
        Err(e) if e.is_degraded() => {
            tracing::info!("Rendering {} without a featured VOD: {}", page.file_name(), e);
            None
        }
        Err(e) => return error_response(&e),
    };

    let values = featured_values(featured.as_ref());
    match state.composer.render(page, &values).await {
        Ok(html) => Html(html).into_response(),
        Err(e) => error_response(&e),
    }
}

/// Manifest and title are only injected together, and only with a non-empty title
fn featured_values(featured: Option<&SelectedVod>) -> Vec<(Placeholder, &str)> {
    match featured {
        Some(vod) if !vod.title.is_empty() && !vod.manifest_url.is_empty() => vec![
            (Placeholder::ManifestUrl, vod.manifest_url.as_str()),
            (Placeholder::Title, vod.title.as_str()),
        ],
        _ => Vec::new(),
    }
}

fn error_response(error: &crate::Error) -> Response {
    let status = if error.is_upstream() {
        StatusCode::BAD_GATEWAY
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };

    tracing::error!(
        details = %crate::error::format_error_for_logging(error),
        "Request failed with {}",
        status
    );
    (status, Json(ErrorResponse::from_error(error))).into_response()
}
