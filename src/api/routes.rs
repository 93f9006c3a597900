//! API Routes
//!
//! Configures the Axum router with all audit service endpoints.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{event_handler, health_handler, lookup_handler, stats_handler, AppState};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `POST /events` - Deliver a create/update/delete message event
/// - `GET /messages/:id` - Inspect a cached snapshot
/// - `GET /stats` - Get cache statistics
/// - `GET /health` - Health check endpoint
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/events", post(event_handler))
        .route("/messages/:id", get(lookup_handler))
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
