//! Canonical event union for all adapters.
//!
//! Events are serialized with a `type` tag so the web UI can switch on it:
//!
//! ```json
//! { "type": "map_search_completed", "query": "cat-only hotel", "results": 3 }
//! ```

use serde::{Deserialize, Serialize};

use crate::domain::{Category, Coordinate, PetId, Species};

/// Canonical event types for all adapters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AppEvent {
    // ========== Registry Events ==========
    /// A pet was added to the registry (and selected).
    PetAdded {
        #[serde(rename = "petId")]
        pet_id: PetId,
        name: String,
    },

    /// A pet profile was replaced.
    PetUpdated {
        #[serde(rename = "petId")]
        pet_id: PetId,
        name: String,
    },

    /// The active pet changed.
    ActivePetChanged {
        #[serde(rename = "petId")]
        pet_id: PetId,
        species: Species,
    },

    // ========== Map Events ==========
    /// The map session settled on a center after the location request.
    MapLocated {
        center: Coordinate,
        /// `false` when the default center is used.
        located: bool,
    },

    /// A facility search started; the loading indicator is on.
    MapSearchStarted {
        category: Category,
        query: String,
    },

    /// A facility search was applied to the map; the loading indicator is off.
    MapSearchCompleted {
        category: Category,
        query: String,
        results: usize,
    },

    /// The map widget was released.
    MapReleased,
}

impl AppEvent {
    /// Stable name of the event variant (matches the serialized `type`).
    pub const fn name(&self) -> &'static str {
        match self {
            Self::PetAdded { .. } => "pet_added",
            Self::PetUpdated { .. } => "pet_updated",
            Self::ActivePetChanged { .. } => "active_pet_changed",
            Self::MapLocated { .. } => "map_located",
            Self::MapSearchStarted { .. } => "map_search_started",
            Self::MapSearchCompleted { .. } => "map_search_completed",
            Self::MapReleased => "map_released",
        }
    }
}
