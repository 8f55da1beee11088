//! Free-text health advice gateway port.

use async_trait::async_trait;

use super::facility_search::GatewayResult;

/// Generative health advice for a pet.
///
/// Returns `Ok(None)` when the gateway answered without any text; the
/// service layer turns that into the "unavailable" fallback.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HealthAdvisorPort: Send + Sync {
    /// Ask for advice about `symptoms` for a pet described by `pet_type`.
    async fn advise(&self, pet_type: &str, symptoms: &str) -> GatewayResult<Option<String>>;
}
