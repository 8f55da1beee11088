//! Prompt text sent to the models.

use petpal_core::Coordinate;

/// System instruction for health advice.
pub const VET_SYSTEM_INSTRUCTION: &str = "You are a professional veterinarian assistant. \
Provide helpful, empathetic, and scientifically grounded advice. \
Always recommend consulting a local vet for serious conditions.";

/// User prompt for health advice.
pub fn advice_prompt(pet_type: &str, symptoms: &str) -> String {
    format!(
        "My pet is a {pet_type}. Current symptoms: {symptoms}. \
         Provide professional advice, care tips, and whether a hospital visit is urgent. \
         Keep it friendly and concise."
    )
}

/// User prompt for maps-grounded facility search.
pub fn search_prompt(query: &str, center: Coordinate) -> String {
    format!(
        "Find high-rated {query} for pets near latitude {}, longitude {}.",
        center.lat, center.lng
    )
}
