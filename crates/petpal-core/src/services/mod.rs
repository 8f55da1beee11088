//! Core services - the application's business logic layer.
//!
//! Services orchestrate between ports (trait interfaces) and domain logic.
//! They don't know about concrete implementations.

mod app_core;
mod health_insights;
mod map_slot;
mod pet_registry;

pub use app_core::{AppCore, CalendarView, PetProfile};
pub use health_insights::{
    HealthInsight, HealthInsightService, INSIGHT_CONNECTION_ERROR, INSIGHT_UNAVAILABLE,
};
pub use map_slot::MapSlot;
pub use pet_registry::{PetCommand, PetRegistry, RegistrySnapshot};
