//! Gemini `generateContent` adapter for petpal.
//!
//! Implements the core's `HealthAdvisorPort` (free-text veterinary advice)
//! and `FacilitySearchPort` (Google Maps grounded place search) over a
//! single HTTP client. Callers only see the core port errors; the
//! Gemini-specific `GeminiError` is mapped at the boundary.
//!
//! ```text
//! AppCore ─────────────▶ HealthAdvisorPort ──┐
//!                                            ├─▶ GeminiClient ─▶ HttpBackend
//! FacilityMapSession ──▶ FacilitySearchPort ─┘
//! ```
#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]
// DefaultGeminiClient is meant to be used through the core gateway ports,
// not its internal generic structure
#![allow(private_interfaces)]

mod client;
mod config;
mod error;
mod http;
mod models;
mod parsing;
mod port;
mod prompts;

// ============================================================================
// Public API
// ============================================================================

// Client
pub use client::DefaultGeminiClient;

// Configuration
pub use config::{DEFAULT_BASE_URL, GeminiClientConfig};

// Errors
pub use error::{GeminiError, GeminiResult};
