//! Route definitions for the fcserve HTTP API.
//!
//! The router is an explicit value built from [`AppState`]; nothing is
//! registered globally, so tests can build as many isolated routers as
//! they like.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::middleware::cors::build_cors_layer;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let max_body = state.config.server.max_body_bytes;
    let cors = build_cors_layer(&state.config.server.cors);

    Router::new()
        .merge(flow_routes())
        .merge(health_routes())
        .fallback(handlers::not_found)
        .layer(DefaultBodyLimit::max(max_body))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(
            middleware::logging::request_logging,
        ))
        .with_state(state)
}

/// list / info / build
///
/// HEAD on list and info answers with an empty body without running the
/// flow. The file name is captured with a wildcard so names spanning several
/// segments still reach name validation and are rejected there. The bare
/// `/info/` and `/build/` paths exist only to report the missing file name.
fn flow_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/list",
            get(handlers::list::list_models)
                .head(handlers::head_empty)
                .fallback(handlers::method_not_allowed),
        )
        .route(
            "/info/",
            get(handlers::missing_file_name)
                .head(handlers::head_empty)
                .fallback(handlers::method_not_allowed),
        )
        .route(
            "/info/{*filename}",
            get(handlers::info::model_info)
                .head(handlers::head_empty)
                .fallback(handlers::method_not_allowed),
        )
        .route(
            "/build/",
            post(handlers::missing_file_name).fallback(handlers::method_not_allowed),
        )
        .route(
            "/build/{*filename}",
            post(handlers::build::build_model).fallback(handlers::method_not_allowed),
        )
}

/// Liveness and engine counters
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
