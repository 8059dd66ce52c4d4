//! Clementine Server - HTTP API over the filter engine and in-memory store.
//!
//! The server is the "external collaborator" around the engine: it parses
//! query-string criteria into the engine's criteria map, owns the write path
//! (validation, total-amount recompute, cascade deletion), and serializes
//! result sequences back to JSON.

#![cfg_attr(not(test), forbid(unsafe_code))]

use axum::Router;
use axum::routing::get;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod config;
pub mod error;
pub mod routes;
pub mod state;
pub mod store;

pub use config::ServerConfig;
pub use state::AppState;
pub use store::Store;

/// Build the application router. Shared by the binary and the in-process
/// integration tests.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(routes::routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}
