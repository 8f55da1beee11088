//! Core domain types.
//!
//! These types represent the pure domain model, independent of any
//! infrastructure concerns (HTTP, browser capabilities, the AI vendor).
//!
//! # Structure
//!
//! - `pet` - Pet profiles and add/edit drafts
//! - `facility` - Map categories and facility search results
//! - `geo` - Coordinates and map defaults
//! - `health` - Health log records and activity charts
//! - `community` - Meetups and the insurance summary
//! - `calendar` - Month grid and schedule entries

pub mod calendar;
pub mod community;
pub mod facility;
pub mod geo;
pub mod health;
pub mod pet;

pub use calendar::{
    CalendarDay, CalendarEvent, CalendarMonth, EventKind, InvalidMonth, MonthKey,
};
pub use community::{InsuranceClaim, InsuranceSummary, Meetup};
pub use facility::{
    Category, Facility, FacilityCandidate, PlaceReference, compose_query, resolve_places,
};
pub use geo::{Coordinate, DEFAULT_CENTER, DEFAULT_ZOOM, RECENTER_ZOOM};
pub use health::{
    ActivityPeriod, ActivityPoint, ActivitySeries, NewPetRecord, PetRecord, RecordKind,
};
pub use pet::{DEFAULT_AVATAR_URL, Pet, PetDraft, PetDraftError, PetId, Species};
