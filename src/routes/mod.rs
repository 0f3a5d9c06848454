//! Route definitions for the dashboard service.

pub mod dashboard;
pub mod health;

use axum::{http::HeaderValue, routing::get, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::AppState;

/// Build the full application router.
pub fn router(state: AppState) -> Router {
    let cors = match state.config.frontend_url.parse::<HeaderValue>() {
        Ok(origin) => CorsLayer::new().allow_origin(origin),
        Err(e) => {
            tracing::warn!(error = %e, url = %state.config.frontend_url, "Invalid FRONTEND_URL, allowing any origin");
            CorsLayer::new().allow_origin(Any)
        }
    }
    .allow_methods(Any)
    .allow_headers(Any);

    let api_routes = Router::new().route("/dashboard", get(dashboard::api));

    Router::new()
        .route("/health/live", get(health::live))
        .route("/health/ready", get(health::ready))
        .route("/dashboard", get(dashboard::page))
        .nest("/api/v1", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
