//! Axum router configuration with middleware.
//!
//! Routes are served at the root and mirrored under `/api`, the prefix the
//! browser frontend calls. Middleware: CORS, request tracing.

use axum::Router;
use axum::routing::get;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Build the complete API router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let routes = Router::new()
        .route("/health", get(handlers::health::health))
        .merge(handlers::execution::execution_routes())
        .merge(handlers::blueprint::blueprint_routes());

    Router::new()
        .merge(routes.clone())
        .nest("/api", routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
