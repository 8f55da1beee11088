//! Ask command handler - symptom advice from the AI assistant.

use petpal_core::PetId;

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::presentation::insight_heading;

/// Ask for advice about `symptoms`, for `pet` or the active pet.
pub async fn execute(
    ctx: &CliContext,
    pet: Option<String>,
    symptoms: &[String],
) -> Result<(), CliError> {
    if !ctx.has_api_key {
        tracing::warn!(
            target: "petpal.gateway",
            "No API key set (GEMINI_API_KEY or API_KEY); advice will be unavailable"
        );
    }

    let symptoms = symptoms.join(" ");
    let insight = match pet {
        Some(id) => ctx.app().ask_insight_for(&PetId::new(id), &symptoms).await?,
        None => ctx.app().ask_insight(&symptoms).await?,
    };

    println!("{}", insight_heading(&insight));
    println!();
    println!("{}", insight.text);
    Ok(())
}
