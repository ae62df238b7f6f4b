use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;

use pathways_core::models::profile::ProfileRequest;
use pathways_core::models::response::RecommendationResponse;
use pathways_recommend::generate_recommendations;

use crate::error::ApiError;
use crate::state::AppState;

/// Rank therapies for one intake submission. Unset fields take the
/// configured defaults.
pub async fn create_recommendations(
    State(state): State<AppState>,
    payload: Result<Json<ProfileRequest>, JsonRejection>,
) -> Result<Json<RecommendationResponse>, ApiError> {
    let Json(request) = payload?;
    let profile = request.into_profile(&state.defaults);

    let recommendations = generate_recommendations(&profile, &state.kb);
    let response = RecommendationResponse::new(&profile, recommendations);

    tracing::info!(
        request_id = %response.request_id,
        high = response.profile.high_priority,
        medium = response.profile.medium_priority,
        low = response.profile.low_priority,
        "recommendations generated"
    );

    Ok(Json(response))
}
