//! Axum router — maps all URL paths to handlers.

use axum::{routing::get, Router};
use tower_http::{
    cors::CorsLayer,
    trace::TraceLayer,
    compression::CompressionLayer,
};
use std::sync::Arc;
use crate::state::{AppState, SharedState};
use crate::handlers::{
    dashboard::dashboard,
    download::download_csv,
    api::{api_occurrences, api_summary},
};

/// Build and return the full Axum router.
pub fn build_router(state: AppState) -> Router {
    let shared: SharedState = Arc::new(state);

    Router::new()
        // Pages
        .route("/",         get(dashboard))
        .route("/download", get(download_csv))

        // API endpoints
        .route("/api/occurrences", get(api_occurrences))
        .route("/api/summary",     get(api_summary))

        // Middleware
        .layer(CorsLayer::permissive())
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(shared)
}
