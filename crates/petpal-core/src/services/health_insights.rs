//! Health insight service - symptom advice through the advisor port.

use std::sync::Arc;

use serde::Serialize;

use crate::domain::Pet;
use crate::ports::{CoreError, HealthAdvisorPort};

/// Shown when the advisor answered without any text.
pub const INSIGHT_UNAVAILABLE: &str = "Insight unavailable at the moment.";

/// Shown when the advisor could not be reached.
pub const INSIGHT_CONNECTION_ERROR: &str = "Error connecting to AI assistant.";

/// Advice shown under the symptom box.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthInsight {
    /// The `"{breed} ({species})"` string sent to the advisor.
    pub pet_type: String,
    pub text: String,
    /// True when `text` is one of the fallback messages.
    pub fallback: bool,
}

/// Service for symptom advice.
pub struct HealthInsightService {
    advisor: Arc<dyn HealthAdvisorPort>,
}

impl HealthInsightService {
    pub fn new(advisor: Arc<dyn HealthAdvisorPort>) -> Self {
        Self { advisor }
    }

    /// Ask for advice about `symptoms` for `pet`.
    ///
    /// Gateway trouble never fails the call; it degrades to a fallback text.
    /// Only blank symptom text is rejected.
    pub async fn ask(&self, pet: &Pet, symptoms: &str) -> Result<HealthInsight, CoreError> {
        let symptoms = symptoms.trim();
        if symptoms.is_empty() {
            return Err(CoreError::Validation(
                "Symptom description cannot be empty".to_string(),
            ));
        }

        let pet_type = pet.type_label();
        let (text, fallback) = match self.advisor.advise(&pet_type, symptoms).await {
            Ok(Some(text)) if !text.trim().is_empty() => (text, false),
            Ok(_) => (INSIGHT_UNAVAILABLE.to_string(), true),
            Err(e) => {
                tracing::warn!(
                    target: "petpal.gateway",
                    error = %e,
                    pet_type = %pet_type,
                    "Health advice request failed"
                );
                (INSIGHT_CONNECTION_ERROR.to_string(), true)
            }
        };

        Ok(HealthInsight {
            pet_type,
            text,
            fallback,
        })
    }
}
