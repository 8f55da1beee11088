//! Port trait implementations for `GeminiClient`.
//!
//! This module implements the core-owned gateway ports, handling the
//! conversion between internal Gemini errors and core port errors.

use async_trait::async_trait;
use petpal_core::ports::{FacilitySearchPort, GatewayError, GatewayResult, HealthAdvisorPort};
use petpal_core::{Coordinate, FacilityCandidate};

use crate::client::GeminiClient;
use crate::error::GeminiError;
use crate::http::HttpBackend;

// ============================================================================
// Error Mapping
// ============================================================================

/// Convert internal `GeminiError` to core `GatewayError`.
fn map_error(err: GeminiError) -> GatewayError {
    match err {
        GeminiError::ApiRequestFailed { status, .. } => {
            if status == 429 {
                GatewayError::RateLimited
            } else {
                GatewayError::Status { status }
            }
        }
        GeminiError::InvalidResponse { message } => GatewayError::InvalidResponse { message },
        e @ GeminiError::MissingApiKey => GatewayError::Configuration {
            message: e.to_string(),
        },
        GeminiError::Network(e) => GatewayError::Network {
            message: e.to_string(),
        },
        GeminiError::InvalidUrl(e) => GatewayError::Configuration {
            message: e.to_string(),
        },
        GeminiError::JsonParse(e) => GatewayError::InvalidResponse {
            message: e.to_string(),
        },
    }
}

// ============================================================================
// Port Implementations
// ============================================================================

#[async_trait]
impl<B: HttpBackend + Send + Sync> HealthAdvisorPort for GeminiClient<B> {
    async fn advise(&self, pet_type: &str, symptoms: &str) -> GatewayResult<Option<String>> {
        self.health_advice(pet_type, symptoms)
            .await
            .map_err(map_error)
    }
}

#[async_trait]
impl<B: HttpBackend + Send + Sync> FacilitySearchPort for GeminiClient<B> {
    async fn search(
        &self,
        center: Coordinate,
        query: &str,
    ) -> GatewayResult<Vec<FacilityCandidate>> {
        self.search_places(center, query).await.map_err(map_error)
    }
}
