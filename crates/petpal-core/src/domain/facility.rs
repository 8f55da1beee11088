//! Facility categories and search results.
//!
//! Search results arrive from the gateway as [`FacilityCandidate`]s whose
//! place reference may be missing. Candidates without one are dropped when
//! they are resolved, so the rest of the system only ever sees complete
//! [`PlaceReference`]s.

use serde::{Deserialize, Serialize};

use super::geo::Coordinate;
use super::pet::Species;

/// Facility category offered as a map filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Category {
    #[default]
    Hospital,
    Playground,
    Park,
    Hotel,
    Sitter,
}

const DOG_CATEGORIES: [Category; 3] = [Category::Hospital, Category::Playground, Category::Park];
const CAT_CATEGORIES: [Category; 3] = [Category::Hospital, Category::Hotel, Category::Sitter];

impl Category {
    /// The fixed filter set for a species, in display order.
    pub const fn available_for(species: Species) -> &'static [Self] {
        match species {
            Species::Cat => &CAT_CATEGORIES,
            Species::Dog | Species::Other => &DOG_CATEGORIES,
        }
    }

    pub fn is_valid_for(self, species: Species) -> bool {
        Self::available_for(species).contains(&self)
    }

    /// This category if it is valid for `species`, otherwise the default.
    #[must_use]
    pub fn normalized_for(self, species: Species) -> Self {
        if self.is_valid_for(species) {
            self
        } else {
            Self::default()
        }
    }

    /// Parse a category from user input (case-insensitive).
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hospital" => Some(Self::Hospital),
            "playground" => Some(Self::Playground),
            "park" => Some(Self::Park),
            "hotel" => Some(Self::Hotel),
            "sitter" => Some(Self::Sitter),
            _ => None,
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Hospital => "Hospital",
            Self::Playground => "Playground",
            Self::Park => "Park",
            Self::Hotel => "Hotel",
            Self::Sitter => "Sitter",
        }
    }

    /// Button label in the filter bar.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Hospital => "Animal Hospital",
            Self::Playground => "Playground",
            Self::Park => "Walking Park",
            Self::Hotel => "Cat Hotel",
            Self::Sitter => "Pet Sitter / Home Visit",
        }
    }

    const fn query_term(self) -> &'static str {
        match self {
            Self::Hospital => "hospital",
            Self::Playground => "playground",
            Self::Park => "park",
            Self::Hotel => "hotel",
            Self::Sitter => "sitter",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Species-qualified search query, e.g. `dog-only hospital`.
#[must_use]
pub fn compose_query(species: Species, category: Category) -> String {
    format!("{}-only {}", species.search_qualifier(), category.query_term())
}

/// Title and link of a place returned by the search gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceReference {
    pub title: String,
    pub uri: String,
}

impl PlaceReference {
    /// Build a reference only when both parts are present and non-blank.
    #[must_use]
    pub fn from_parts(title: Option<&str>, uri: Option<&str>) -> Option<Self> {
        let title = title.map(str::trim).filter(|t| !t.is_empty())?;
        let uri = uri.map(str::trim).filter(|u| !u.is_empty())?;
        Some(Self {
            title: title.to_string(),
            uri: uri.to_string(),
        })
    }
}

/// One raw search result as delivered by the gateway.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FacilityCandidate {
    pub place: Option<PlaceReference>,
}

impl FacilityCandidate {
    pub const fn with_place(place: PlaceReference) -> Self {
        Self { place: Some(place) }
    }

    /// A result that carried no usable place reference.
    pub const fn unresolved() -> Self {
        Self { place: None }
    }
}

/// Keep only candidates that resolve to a place, preserving order.
///
/// Returns the places and the number of dropped candidates.
#[must_use]
pub fn resolve_places(candidates: Vec<FacilityCandidate>) -> (Vec<PlaceReference>, usize) {
    let total = candidates.len();
    let places: Vec<PlaceReference> = candidates.into_iter().filter_map(|c| c.place).collect();
    let dropped = total - places.len();
    (places, dropped)
}

/// A resolved facility as shown in the list and on the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Facility {
    pub title: String,
    pub uri: String,
    /// Approximate position; see `map::placement`.
    pub position: Coordinate,
}
