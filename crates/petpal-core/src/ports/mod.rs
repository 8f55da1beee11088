//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces that the core domain expects from infrastructure.
//! They contain no implementation details and use only domain types.
//!
//! # Design Rules
//!
//! - No `reqwest` or Gemini wire types in any signature
//! - Browser capabilities (map widget, geolocation) are ports too
//! - Gateway failures surface as [`GatewayError`], never as adapter errors

pub mod event_emitter;
pub mod facility_search;
pub mod geolocation;
pub mod health_advisor;
pub mod map_surface;

use thiserror::Error;

use crate::domain::{PetDraftError, PetId};

pub use event_emitter::{AppEventEmitter, NoopEmitter};
#[cfg(test)]
pub use event_emitter::RecordingEmitter;
pub use facility_search::{FacilitySearchPort, GatewayError, GatewayResult};
pub use geolocation::{DeniedLocation, FixedLocation, GeolocationError, GeolocationPort};
#[cfg(test)]
pub use health_advisor::MockHealthAdvisorPort;
pub use health_advisor::HealthAdvisorPort;
pub use map_surface::{MapInit, MapSurface, MapSurfaceFactory, Marker};

/// Errors from pet registry operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RegistryError {
    /// The registry must hold at least one pet.
    #[error("Pet registry cannot be empty")]
    Empty,

    /// No pet with this id.
    #[error("Pet not found: {0}")]
    NotFound(PetId),

    /// An id that is already taken.
    #[error("Pet already exists: {0}")]
    Duplicate(PetId),

    /// The draft failed validation.
    #[error(transparent)]
    InvalidDraft(#[from] PetDraftError),
}

/// Core error type for semantic domain errors.
///
/// This is the canonical error type used across the core domain.
/// Adapters should map this to their own error types (HTTP status codes,
/// CLI exit codes).
#[derive(Debug, Error)]
pub enum CoreError {
    /// Pet registry operation failed.
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// Map session operation failed.
    #[error(transparent)]
    Map(#[from] crate::map::MapSessionError),

    /// External gateway failed.
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    /// Settings validation error.
    #[error(transparent)]
    Settings(#[from] crate::settings::SettingsError),

    /// Validation error (invalid input).
    #[error("Validation error: {0}")]
    Validation(String),

    /// The requested entity was not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Configuration(String),
}
