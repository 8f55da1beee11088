//! Request and response bodies that exist only on the HTTP surface.

use petpal_core::{Category, Coordinate, PetId};
use serde::{Deserialize, Serialize};

/// A filter button: category id plus its label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryOption {
    pub id: Category,
    pub label: &'static str,
}

impl From<Category> for CategoryOption {
    fn from(category: Category) -> Self {
        Self {
            id: category,
            label: category.label(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SpeciesQuery {
    pub species: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ActivityQuery {
    pub period: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CalendarQuery {
    pub year: Option<i32>,
    pub month: Option<u32>,
}

/// Symptom text, optionally for a pet other than the active one.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightRequest {
    pub symptoms: String,
    #[serde(default)]
    pub pet_id: Option<PetId>,
}

/// Body of `POST /api/map/mount`.
///
/// `position` is what the browser's geolocation reported; absent when the
/// user denied it or the browser has none.
#[derive(Debug, Default, Deserialize)]
pub struct MountMapRequest {
    #[serde(default)]
    pub position: Option<Coordinate>,
}

#[derive(Debug, Deserialize)]
pub struct CategoryRequest {
    pub category: String,
}

#[derive(Debug, Serialize)]
pub struct RecenterResponse {
    pub center: Coordinate,
}

#[derive(Debug, Serialize)]
pub struct LinkResponse {
    pub uri: String,
}

#[derive(Debug, Serialize)]
pub struct UnmountResponse {
    pub unmounted: bool,
}
