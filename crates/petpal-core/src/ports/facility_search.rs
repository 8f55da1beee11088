//! Facility search gateway port.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{Coordinate, FacilityCandidate};

/// Errors from the external generative-AI gateway.
///
/// Adapter-specific errors (HTTP, JSON) are mapped to these at the boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    /// Network or connectivity error.
    #[error("Network error: {message}")]
    Network { message: String },

    /// The gateway answered with a non-success status.
    #[error("Gateway request failed with status {status}")]
    Status { status: u16 },

    /// Quota exhausted.
    #[error("Rate limit exceeded, try again later")]
    RateLimited,

    /// Invalid response body.
    #[error("Invalid gateway response: {message}")]
    InvalidResponse { message: String },

    /// Missing API key or malformed endpoint.
    #[error("Gateway configuration error: {message}")]
    Configuration { message: String },
}

/// Result type alias for gateway port operations.
pub type GatewayResult<T> = Result<T, GatewayError>;

/// Location-grounded facility search.
///
/// The implementation lives in `petpal-gemini`. Results that carry no place
/// reference are returned as unresolved candidates, never as errors.
#[async_trait]
pub trait FacilitySearchPort: Send + Sync {
    /// Search for places matching `query` around `center`.
    async fn search(
        &self,
        center: Coordinate,
        query: &str,
    ) -> GatewayResult<Vec<FacilityCandidate>>;
}
