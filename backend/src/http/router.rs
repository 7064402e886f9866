//! Router configuration for the web page and the HTTP API.
//!
//! This module sets up all routes, middleware (CORS, compression, tracing),
//! static file serving, and creates the axum router ready for serving.

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use super::handlers;
use super::state::AppState;

/// Create the main application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_v1 = Router::new()
        .route("/conflicts", post(handlers::check_conflicts))
        .route("/charts", post(handlers::create_chart));

    let static_files = ServeDir::new(state.config.storage.static_dir.clone());

    Router::new()
        .route("/", get(handlers::index))
        .route("/generate_chart", post(handlers::generate_chart_form))
        .route("/chart/{filename}", get(handlers::get_chart))
        .route("/health", get(handlers::health_check))
        .nest("/v1", api_v1)
        .nest_service("/static", static_files)
        .layer(DefaultBodyLimit::max(1024 * 1024))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;

    #[test]
    fn test_router_creation() {
        let state = AppState::new(AppConfig::default());
        let _router = create_router(state);
    }
}
