//! Health insight handler.

use axum::Json;
use axum::extract::State;
use petpal_core::services::HealthInsight;

use crate::dto::InsightRequest;
use crate::error::HttpError;
use crate::state::AppState;

/// Ask for symptom advice.
///
/// Gateway trouble never fails the request: the insight carries a fallback
/// text instead.
pub async fn ask(
    State(state): State<AppState>,
    Json(req): Json<InsightRequest>,
) -> Result<Json<HealthInsight>, HttpError> {
    let insight = match req.pet_id {
        Some(id) => state.core.ask_insight_for(&id, &req.symptoms).await?,
        None => state.core.ask_insight(&req.symptoms).await?,
    };
    Ok(Json(insight))
}
