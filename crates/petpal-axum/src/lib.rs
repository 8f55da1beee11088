//! Axum web server adapter for petpal.
//!
//! Serves the JSON API under `/api`, an SSE stream of `AppEvent`s under
//! `/api/events`, and optionally the built web UI with SPA fallback.
//! [`bootstrap`] is the composition root wiring the Gemini client into
//! `AppCore`.

#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

// Dev-dependencies used only by tests/ (the lib test build still links them)
#[cfg(test)]
use async_trait as _;
#[cfg(test)]
use http_body_util as _;
#[cfg(test)]
use tower as _;

pub mod bootstrap;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod sse;
pub mod state;

// Re-export primary types
pub use bootstrap::{AxumContext, ContextDeps, CorsConfig, ServerConfig, bootstrap, start_server};
pub use error::HttpError;
pub use routes::{create_router, create_spa_router};
pub use sse::SseBroadcaster;
pub use state::AppState;
