//! Route definitions for the TestDeck HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`.
//! The router receives `AppState` and passes it to all handlers via
//! Axum's `State` extractor.

use axum::{
    Router,
    http::{HeaderValue, Method},
    routing::{delete, get, post, put},
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use testdeck_core::config::CorsConfig;

use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(tree_routes())
        .merge(folder_routes())
        .merge(case_routes())
        .merge(version_routes())
        .merge(health_routes());

    let cors = build_cors_layer(&state.config.server.cors);

    Router::new()
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// The full tree in one response
fn tree_routes() -> Router<AppState> {
    Router::new().route("/tree", get(handlers::folder::get_tree))
}

/// Folder CRUD, move, reorder, duplicate
fn folder_routes() -> Router<AppState> {
    Router::new()
        .route("/folders", post(handlers::folder::create_folder))
        .route("/folders/{id}", get(handlers::folder::get_folder))
        .route("/folders/{id}", delete(handlers::folder::delete_folder))
        .route("/folders/{id}/rename", put(handlers::folder::rename_folder))
        .route("/folders/{id}/move", put(handlers::folder::move_folder))
        .route(
            "/folders/{id}/reorder",
            put(handlers::folder::reorder_folder),
        )
        .route(
            "/folders/{id}/duplicate",
            post(handlers::folder::duplicate_folder),
        )
}

/// Test case CRUD, move, reorder, duplicate
fn case_routes() -> Router<AppState> {
    Router::new()
        .route("/folders/{id}/cases", get(handlers::case::list_cases))
        .route("/cases", post(handlers::case::create_case))
        .route("/cases/{id}", get(handlers::case::get_case))
        .route("/cases/{id}", delete(handlers::case::delete_case))
        .route("/cases/{id}/rename", put(handlers::case::rename_case))
        .route("/cases/{id}/move", put(handlers::case::move_case))
        .route("/cases/{id}/reorder", put(handlers::case::reorder_case))
        .route("/cases/{id}/duplicate", post(handlers::case::duplicate_case))
}

/// Content updates and version history
fn version_routes() -> Router<AppState> {
    Router::new()
        .route("/cases/{id}/content", put(handlers::version::update_content))
        .route("/cases/{id}/versions", get(handlers::version::list_versions))
        .route(
            "/cases/{id}/versions/{version}",
            get(handlers::version::get_version),
        )
        .route(
            "/cases/{id}/versions/{version}/restore",
            post(handlers::version::restore_version),
        )
}

/// Health check endpoints
fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health::health))
        .route("/health/detailed", get(handlers::health::health_detailed))
}

/// Build CORS layer from configuration
fn build_cors_layer(config: &CorsConfig) -> CorsLayer {
    let mut cors = CorsLayer::new();

    if config.allowed_origins.contains(&"*".to_string()) {
        cors = cors.allow_origin(Any);
    } else {
        let origins: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        cors = cors.allow_origin(origins);
    }

    let methods: Vec<Method> = config
        .allowed_methods
        .iter()
        .filter_map(|m| m.parse().ok())
        .collect();
    cors = cors.allow_methods(methods);

    if config.allowed_headers.contains(&"*".to_string()) {
        cors = cors.allow_headers(Any);
    }

    cors
}
