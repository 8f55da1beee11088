//! Map handlers - the facility-search session of the map view.
//!
//! The browser owns the actual map and its geolocation; it mounts a session
//! with whatever position it got, then renders the returned snapshots.

use axum::Json;
use axum::extract::{Path, State};
use petpal_core::map::MapSnapshot;
use petpal_core::ports::{DeniedLocation, FixedLocation, GeolocationPort};
use petpal_core::{Category, Coordinate};

use crate::dto::{CategoryRequest, LinkResponse, MountMapRequest, RecenterResponse, UnmountResponse};
use crate::error::HttpError;
use crate::state::AppState;

/// Mount the map view for the active pet, replacing any mounted session.
///
/// An empty object mounts on the default center. Responds once the initial
/// search has been applied.
pub async fn mount(
    State(state): State<AppState>,
    Json(req): Json<MountMapRequest>,
) -> Json<MapSnapshot> {
    let geolocation: Box<dyn GeolocationPort> = match req.position {
        Some(position) => Box::new(FixedLocation(position)),
        None => Box::new(DeniedLocation),
    };
    Json(state.core.mount_map(geolocation.as_ref()).await)
}

/// Unmount the map view, releasing its widget.
pub async fn unmount(State(state): State<AppState>) -> Json<UnmountResponse> {
    let unmounted = state.core.map().unmount().await;
    Json(UnmountResponse { unmounted })
}

/// Current session snapshot.
pub async fn snapshot(State(state): State<AppState>) -> Result<Json<MapSnapshot>, HttpError> {
    let session = state.core.map().require().await?;
    Ok(Json(session.snapshot().await))
}

/// Select a filter category and search again.
pub async fn select_category(
    State(state): State<AppState>,
    Json(req): Json<CategoryRequest>,
) -> Result<Json<MapSnapshot>, HttpError> {
    let category = Category::parse(&req.category)
        .ok_or_else(|| HttpError::BadRequest(format!("Unknown category: {}", req.category)))?;
    let session = state.core.map().require().await?;
    session.select_category(category).await?;
    Ok(Json(session.snapshot().await))
}

/// Report a new user position.
pub async fn update_location(
    State(state): State<AppState>,
    Json(position): Json<Coordinate>,
) -> Result<Json<MapSnapshot>, HttpError> {
    let session = state.core.map().require().await?;
    session.update_location(position).await?;
    Ok(Json(session.snapshot().await))
}

/// Recenter on the last known position.
pub async fn recenter(State(state): State<AppState>) -> Result<Json<RecenterResponse>, HttpError> {
    let session = state.core.map().require().await?;
    let center = session.recenter().await?;
    Ok(Json(RecenterResponse { center }))
}

/// Link to open for a list entry or marker.
pub async fn facility_link(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> Result<Json<LinkResponse>, HttpError> {
    let session = state.core.map().require().await?;
    let uri = session.facility_link(index).await?;
    Ok(Json(LinkResponse { uri }))
}
