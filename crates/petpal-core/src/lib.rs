//! Core domain, ports and services for petpal.
//!
//! `petpal-core` holds everything that does not touch the network or a
//! screen: pet profiles and the registry, the facility map session, health
//! insights, seed data and settings. Adapters provide the ports.
//!
//! | Module | Contents |
//! |---|---|
//! | [`domain`] | Pets, categories, coordinates, health log, listings, calendar |
//! | [`ports`] | Gateway, geolocation, map surface and event emitter traits |
//! | [`map`] | Map widget guard, marker placement, per-mount session |
//! | [`services`] | `AppCore` facade, registry, insights, map slot |
//! | [`events`] | `AppEvent` union for SSE and other transports |

#![deny(unused_crate_dependencies)]

pub mod domain;
pub mod events;
pub mod map;
pub mod ports;
pub mod seed;
pub mod services;
pub mod settings;

// Re-export commonly used types for convenience
pub use domain::{
    ActivityPeriod, ActivitySeries, CalendarMonth, Category, Coordinate, Facility,
    FacilityCandidate, InsuranceSummary, Meetup, NewPetRecord, Pet, PetDraft, PetId, PetRecord,
    PlaceReference, Species,
};
pub use events::AppEvent;
pub use map::{
    FacilityMapSession, HeadlessMapFactory, JitterSource, MapPhase, MapSessionDeps,
    MapSessionError, MapSnapshot, MapViewConfig, RandomJitter, SearchOutcome,
};
pub use ports::{
    AppEventEmitter, CoreError, DeniedLocation, FacilitySearchPort, FixedLocation, GatewayError,
    GatewayResult, GeolocationPort, HealthAdvisorPort, NoopEmitter, RegistryError,
};
pub use services::{AppCore, CalendarView, HealthInsight, MapSlot, PetCommand, PetProfile};
pub use settings::{Settings, SettingsError, validate_settings};
