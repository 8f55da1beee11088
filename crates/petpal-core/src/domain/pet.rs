//! Pet profile domain types.
//!
//! A [`Pet`] is always replaced wholesale; edits and additions both start
//! from a [`PetDraft`], which carries every field except the identifier.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Avatar used by the add-pet form before the owner picks a photo.
pub const DEFAULT_AVATAR_URL: &str = "https://images.unsplash.com/photo-1543466835-00a7907e9de1?auto=format&fit=crop&q=80&w=600&h=600";

/// Stable identifier of a pet profile (e.g. `pet-1`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PetId(String);

impl PetId {
    /// Wrap an existing identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a fresh identifier for a newly added pet.
    #[must_use]
    pub fn generate() -> Self {
        Self(format!("pet-{}", uuid::Uuid::new_v4().simple()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PetId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Species of a pet. Drives the facility categories offered on the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Species {
    #[default]
    Dog,
    Cat,
    Other,
}

impl Species {
    /// Parse a species from user input (case-insensitive).
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dog" => Some(Self::Dog),
            "cat" => Some(Self::Cat),
            "other" => Some(Self::Other),
            _ => None,
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Dog => "Dog",
            Self::Cat => "Cat",
            Self::Other => "Other",
        }
    }

    /// Word used to qualify facility searches ("cat-only hotel").
    ///
    /// Anything that is not a cat is searched for as a dog.
    pub const fn search_qualifier(&self) -> &'static str {
        match self {
            Self::Cat => "cat",
            Self::Dog | Self::Other => "dog",
        }
    }

    /// Badge shown next to recommendations.
    pub const fn friendliness_badge(&self) -> &'static str {
        match self {
            Self::Cat => "Cat Friendly",
            Self::Dog | Self::Other => "Dog Friendly",
        }
    }
}

impl std::fmt::Display for Species {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A pet profile owned by the registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pet {
    pub id: PetId,
    pub name: String,
    pub species: Species,
    pub breed: String,
    pub avatar: String,
    pub birth_date: NaiveDate,
    /// Weight in kilograms.
    pub weight: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reg_number: Option<String>,
}

impl Pet {
    /// Age in years at `today`, rounded to one decimal (e.g. `4.5`).
    ///
    /// Uses 365.25-day years. Birth dates in the future yield `0.0`.
    #[must_use]
    pub fn age_years(&self, today: NaiveDate) -> f64 {
        let days = (today - self.birth_date).num_days().max(0);
        #[allow(clippy::cast_precision_loss)] // day counts are far below 2^52
        let years = days as f64 / 365.25;
        (years * 10.0).round() / 10.0
    }

    /// Free-text pet description handed to the advice gateway.
    #[must_use]
    pub fn type_label(&self) -> String {
        format!("{} ({})", self.breed, self.species)
    }

    /// The editable fields of this pet, for pre-filling the edit form.
    #[must_use]
    pub fn to_draft(&self) -> PetDraft {
        PetDraft {
            name: self.name.clone(),
            species: self.species,
            breed: self.breed.clone(),
            avatar: self.avatar.clone(),
            birth_date: self.birth_date,
            weight: self.weight,
            reg_number: self.reg_number.clone(),
        }
    }
}

/// Form data for adding or editing a pet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PetDraft {
    pub name: String,
    pub species: Species,
    pub breed: String,
    pub avatar: String,
    pub birth_date: NaiveDate,
    pub weight: f64,
    pub reg_number: Option<String>,
}

impl Default for PetDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            species: Species::Dog,
            breed: String::new(),
            avatar: DEFAULT_AVATAR_URL.to_string(),
            birth_date: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap_or_default(),
            weight: 5.0,
            reg_number: None,
        }
    }
}

/// Why a draft cannot become a pet.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PetDraftError {
    #[error("Pet name cannot be empty")]
    EmptyName,

    #[error("Weight must be a positive number of kilograms, got {0}")]
    InvalidWeight(f64),
}

impl PetDraft {
    /// Check the fields the form marks as required.
    pub fn validate(&self) -> Result<(), PetDraftError> {
        if self.name.trim().is_empty() {
            return Err(PetDraftError::EmptyName);
        }
        if !self.weight.is_finite() || self.weight <= 0.0 {
            return Err(PetDraftError::InvalidWeight(self.weight));
        }
        Ok(())
    }

    /// Attach an identifier, producing a full profile.
    ///
    /// An empty registration number is stored as `None`.
    pub fn into_pet(self, id: PetId) -> Result<Pet, PetDraftError> {
        self.validate()?;
        let reg_number = self
            .reg_number
            .map(|r| r.trim().to_string())
            .filter(|r| !r.is_empty());
        Ok(Pet {
            id,
            name: self.name.trim().to_string(),
            species: self.species,
            breed: self.breed.trim().to_string(),
            avatar: self.avatar,
            birth_date: self.birth_date,
            weight: self.weight,
            reg_number,
        })
    }
}
