//! Conversion of `generateContent` responses into petpal values.
//!
//! Only the first candidate is read, as the app never asks for more.

use petpal_core::{FacilityCandidate, PlaceReference};

use crate::models::{GenerateContentResponse, GroundingChunk};

/// Text of the first candidate, or `None` when it carries none.
pub fn extract_text(response: &GenerateContentResponse) -> Option<String> {
    let content = response.candidates.first()?.content.as_ref()?;
    let text: String = content
        .parts
        .iter()
        .filter_map(|p| p.text.as_deref())
        .collect();
    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Grounding chunks of the first candidate as facility candidates.
///
/// A chunk without a `maps` entry, or whose title or uri is missing or
/// blank, becomes an unresolved candidate.
pub fn extract_places(response: &GenerateContentResponse) -> Vec<FacilityCandidate> {
    response
        .candidates
        .first()
        .and_then(|c| c.grounding_metadata.as_ref())
        .map(|m| m.grounding_chunks.iter().map(to_candidate).collect())
        .unwrap_or_default()
}

fn to_candidate(chunk: &GroundingChunk) -> FacilityCandidate {
    let place = chunk
        .maps
        .as_ref()
        .and_then(|m| PlaceReference::from_parts(m.title.as_deref(), m.uri.as_deref()));
    FacilityCandidate { place }
}
