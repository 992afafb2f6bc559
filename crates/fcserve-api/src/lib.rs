//! # fcserve-api
//!
//! HTTP API layer for fcserve built on Axum.
//!
//! Exposes the `list`, `info` and `build` flows plus a health endpoint,
//! maps pipeline errors to HTTP responses and owns server startup.

pub mod app;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::run_server;
pub use error::ApiError;
pub use router::build_router;
pub use state::AppState;
