//! Read-only listings: categories, community, insurance and calendar.

use axum::Json;
use axum::extract::{Query, State};
use petpal_core::services::CalendarView;
use petpal_core::{Category, InsuranceSummary, Meetup, Species};

use crate::dto::{CalendarQuery, CategoryOption, SpeciesQuery};
use crate::error::HttpError;
use crate::state::AppState;

/// Filter categories for a species; the active pet's species when omitted.
pub async fn categories(
    State(state): State<AppState>,
    Query(query): Query<SpeciesQuery>,
) -> Result<Json<Vec<CategoryOption>>, HttpError> {
    let species = match query.species.as_deref() {
        Some(raw) => Species::parse(raw)
            .ok_or_else(|| HttpError::BadRequest(format!("Unknown species: {raw}")))?,
        None => state.core.active_pet().await.species,
    };
    let options = Category::available_for(species)
        .iter()
        .copied()
        .map(CategoryOption::from)
        .collect();
    Ok(Json(options))
}

pub async fn meetups(State(state): State<AppState>) -> Json<Vec<Meetup>> {
    Json(state.core.meetups())
}

pub async fn insurance(State(state): State<AppState>) -> Json<InsuranceSummary> {
    Json(state.core.insurance().await)
}

/// Month grid plus the active pet's schedule; current month by default.
pub async fn calendar(
    State(state): State<AppState>,
    Query(query): Query<CalendarQuery>,
) -> Result<Json<CalendarView>, HttpError> {
    Ok(Json(state.core.calendar(query.year, query.month).await?))
}
