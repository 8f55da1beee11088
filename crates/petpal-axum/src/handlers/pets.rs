//! Pet handlers - registry, health log and activity.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use chrono::Local;
use petpal_core::services::{PetProfile, RegistrySnapshot};
use petpal_core::{ActivityPeriod, ActivitySeries, NewPetRecord, Pet, PetDraft, PetId, PetRecord};

use crate::dto::ActivityQuery;
use crate::error::HttpError;
use crate::state::AppState;

/// List all pets with the active id.
pub async fn list(State(state): State<AppState>) -> Json<RegistrySnapshot> {
    Json(state.core.pets().await)
}

/// Add a pet; it becomes the active pet.
pub async fn add(
    State(state): State<AppState>,
    Json(draft): Json<PetDraft>,
) -> Result<(StatusCode, Json<Pet>), HttpError> {
    let pet = state.core.add_pet(draft).await?;
    Ok((StatusCode::CREATED, Json(pet)))
}

/// Replace a pet profile wholesale.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(draft): Json<PetDraft>,
) -> Result<Json<Pet>, HttpError> {
    let pet = draft
        .into_pet(PetId::new(id))
        .map_err(|e| HttpError::BadRequest(e.to_string()))?;
    Ok(Json(state.core.update_pet(pet).await?))
}

/// Make a pet active.
pub async fn select(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Pet>, HttpError> {
    Ok(Json(state.core.select_pet(PetId::new(id)).await?))
}

/// The active pet with its computed age.
pub async fn active(State(state): State<AppState>) -> Json<PetProfile> {
    let today = Local::now().date_naive();
    Json(state.core.active_profile(today).await)
}

/// Health log of the active pet, newest first.
pub async fn records(State(state): State<AppState>) -> Json<Vec<PetRecord>> {
    Json(state.core.records().await)
}

/// Append to the active pet's health log.
pub async fn add_record(
    State(state): State<AppState>,
    Json(record): Json<NewPetRecord>,
) -> Result<(StatusCode, Json<PetRecord>), HttpError> {
    let record = state.core.add_record(record).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// Activity chart series; weekly unless `period=monthly`.
pub async fn activity(
    State(state): State<AppState>,
    Query(query): Query<ActivityQuery>,
) -> Result<Json<ActivitySeries>, HttpError> {
    let period = match query.period.as_deref() {
        None => ActivityPeriod::default(),
        Some(raw) => ActivityPeriod::parse(raw)
            .ok_or_else(|| HttpError::BadRequest(format!("Unknown activity period: {raw}")))?,
    };
    Ok(Json(state.core.activity(period)))
}
