//! Route definitions and router construction.
//!
//! This module defines the HTTP routes and creates the main router.
//! Handlers delegate to the shared `AppCore` facade.

use axum::Router;
use axum::routing::{get, post, put};
use std::path::Path;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::bootstrap::{AxumContext, CorsConfig};
use crate::handlers;
use crate::state::AppState;

/// Build CORS layer from configuration.
fn build_cors_layer(config: &CorsConfig) -> CorsLayer {
    match config {
        CorsConfig::AllowAll => CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
        CorsConfig::AllowOrigins(origins) => {
            use axum::http::HeaderValue;
            let allowed: Vec<HeaderValue> = origins.iter().filter_map(|o| o.parse().ok()).collect();
            CorsLayer::new()
                .allow_origin(allowed)
                .allow_methods(Any)
                .allow_headers(Any)
        }
    }
}

/// Build all API routes without `/api` prefix (for nesting under /api).
pub(crate) fn api_routes() -> Router<AppState> {
    Router::new()
        // Pets API
        .route(
            "/pets",
            get(handlers::pets::list).post(handlers::pets::add),
        )
        .route("/pets/active", get(handlers::pets::active))
        .route(
            "/pets/active/records",
            get(handlers::pets::records).post(handlers::pets::add_record),
        )
        .route("/pets/active/activity", get(handlers::pets::activity))
        .route("/pets/{id}", put(handlers::pets::update))
        .route("/pets/{id}/select", post(handlers::pets::select))
        // Health insights API
        .route("/insights", post(handlers::health::ask))
        // Catalog API
        .route("/categories", get(handlers::catalog::categories))
        .route("/community/meetups", get(handlers::catalog::meetups))
        .route("/insurance", get(handlers::catalog::insurance))
        .route("/calendar", get(handlers::catalog::calendar))
        // Map API
        .route(
            "/map",
            get(handlers::map::snapshot).delete(handlers::map::unmount),
        )
        .route("/map/mount", post(handlers::map::mount))
        .route("/map/category", put(handlers::map::select_category))
        .route("/map/location", put(handlers::map::update_location))
        .route("/map/recenter", post(handlers::map::recenter))
        .route(
            "/map/facilities/{index}/link",
            get(handlers::map::facility_link),
        )
        // Events (SSE)
        .route("/events", get(handlers::events::stream))
}

/// Create the main Axum router with all API routes.
///
/// This creates the API routes only. For serving static assets,
/// use [`create_spa_router`] which includes both API routes and
/// static file serving with SPA fallback.
pub fn create_router(ctx: AxumContext, cors_config: &CorsConfig) -> Router {
    let state: AppState = Arc::new(ctx);
    let cors = build_cors_layer(cors_config);

    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api_routes().with_state(state).layer(cors))
        .layer(TraceLayer::new_for_http())
}

/// Create a router with API routes and static asset serving.
///
/// Unmatched paths fall back to `index.html` for client-side routing.
pub fn create_spa_router<P: AsRef<Path>>(
    ctx: AxumContext,
    static_dir: P,
    cors_config: &CorsConfig,
) -> Router {
    let static_path = static_dir.as_ref();
    let index_path = static_path.join("index.html");

    let serve_dir = ServeDir::new(static_path).fallback(ServeFile::new(&index_path));

    // API routes take priority, then fallback to static/SPA serving
    create_router(ctx, cors_config).fallback_service(serve_dir)
}

/// Health check endpoint.
pub(crate) async fn health_check() -> &'static str {
    "OK"
}
