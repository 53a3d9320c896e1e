//! DocDesk Server Library
//!
//! A browser-based desk for converting between PDF and Word documents.
//! The server binary is in main.rs; the router is built here so tests can
//! drive it directly.
//!
//! # Modules
//!
//! - `workspace`: Session-scoped file table, actions and session manager
//! - `convert`: PDF and Word collaborators behind one conversion service
//! - `archive`: Batch export as ZIP
//! - `routes` / `html`: The desk pages and the JSON API

pub mod archive;
pub mod config;
pub mod convert;
pub mod error;
pub mod html;
pub mod routes;
pub mod state;
pub mod workspace;

use axum::{extract::DefaultBodyLimit, routing::get, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use routes::health::health_check;
use state::AppState;

/// Build the application router
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let body_limit = state.config().server.max_upload_bytes();

    Router::new()
        .route("/health", get(health_check))
        .route("/api/v1/health", get(health_check))
        .route("/", get(routes::desk::start_session))
        .nest("/w", routes::desk::router())
        .nest("/api/v1/sessions", routes::api::router())
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
