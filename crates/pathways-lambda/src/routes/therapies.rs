use axum::extract::{Path, State};
use axum::Json;

use pathways_recommend::knowledge::TherapyEntry;

use crate::error::ApiError;
use crate::state::AppState;

pub async fn list_therapies(State(state): State<AppState>) -> Json<Vec<TherapyEntry>> {
    Json(state.kb.therapies.clone())
}

pub async fn get_therapy(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<TherapyEntry>, ApiError> {
    let entry = state
        .kb
        .get(&key)
        .ok_or_else(|| ApiError::NotFound(format!("therapy not found: {key}")))?;
    Ok(Json(entry.clone()))
}
