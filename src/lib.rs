pub mod config;
pub mod errors;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use services::upstream::UpstreamClient;

/// Shared application state passed to all Axum handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: config::AppConfig,
    pub upstream: UpstreamClient,
}
