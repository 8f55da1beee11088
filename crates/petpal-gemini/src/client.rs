//! Gemini client for health advice and maps-grounded search.

use petpal_core::{Coordinate, FacilityCandidate};
use url::Url;

use crate::config::GeminiClientConfig;
use crate::error::{GeminiError, GeminiResult};
use crate::http::{HttpBackend, ReqwestBackend};
use crate::models::{GeminiConfig, GenerateContentRequest, GenerateContentResponse};
use crate::parsing::{extract_places, extract_text};
use crate::prompts::{VET_SYSTEM_INSTRUCTION, advice_prompt, search_prompt};

// ============================================================================
// Type Aliases
// ============================================================================

/// Default Gemini client using the reqwest HTTP backend.
pub type DefaultGeminiClient = GeminiClient<ReqwestBackend>;

// ============================================================================
// Client
// ============================================================================

/// Client for the Gemini `generateContent` endpoint.
///
/// This client is generic over an HTTP backend, allowing for easy testing.
/// Use `DefaultGeminiClient` for production code and talk to it through the
/// core's `HealthAdvisorPort` and `FacilitySearchPort`.
pub struct GeminiClient<B: HttpBackend> {
    pub(crate) backend: B,
    pub(crate) config: GeminiConfig,
}

impl DefaultGeminiClient {
    /// Create a new client with the given configuration.
    pub fn new(config: &GeminiClientConfig) -> GeminiResult<Self> {
        let internal = Self::to_internal_config(config)?;
        let backend = ReqwestBackend::new(config)?;
        Ok(Self {
            backend,
            config: internal,
        })
    }

    fn to_internal_config(config: &GeminiClientConfig) -> GeminiResult<GeminiConfig> {
        Ok(GeminiConfig {
            base_url: Url::parse(&config.base_url)?,
            api_key: config
                .api_key
                .as_deref()
                .map(str::trim)
                .filter(|k| !k.is_empty())
                .map(str::to_string),
            advice_model: config.advice_model.clone(),
            search_model: config.search_model.clone(),
        })
    }
}

impl<B: HttpBackend> GeminiClient<B> {
    /// Create a new client with a custom backend.
    ///
    /// Use this for testing with a fake backend.
    #[cfg(test)]
    pub(crate) const fn with_backend(config: GeminiConfig, backend: B) -> Self {
        Self { backend, config }
    }

    async fn generate(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> GeminiResult<GenerateContentResponse> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(GeminiError::MissingApiKey)?;
        let url = self.config.generate_url(model)?;
        tracing::debug!(target: "petpal.gateway", model, "generateContent");
        self.backend.post_json(&url, api_key, request).await
    }

    /// Free-text advice for a pet described by `pet_type`.
    ///
    /// `Ok(None)` when the model answered without text.
    pub async fn health_advice(
        &self,
        pet_type: &str,
        symptoms: &str,
    ) -> GeminiResult<Option<String>> {
        let request = GenerateContentRequest::user_text(advice_prompt(pet_type, symptoms))
            .with_system_instruction(VET_SYSTEM_INSTRUCTION);
        let response = self.generate(&self.config.advice_model, &request).await?;
        Ok(extract_text(&response))
    }

    /// Places matching `query` near `center`, in gateway order.
    pub async fn search_places(
        &self,
        center: Coordinate,
        query: &str,
    ) -> GeminiResult<Vec<FacilityCandidate>> {
        let request = GenerateContentRequest::user_text(search_prompt(query, center))
            .with_maps_grounding(center.lat, center.lng);
        let response = self.generate(&self.config.search_model, &request).await?;
        let places = extract_places(&response);
        tracing::debug!(
            target: "petpal.gateway",
            query,
            chunks = places.len(),
            "Maps grounding returned"
        );
        Ok(places)
    }
}
