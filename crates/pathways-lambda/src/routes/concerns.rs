use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
pub struct ConcernSummary {
    concern: String,
    tags: Vec<String>,
}

/// The intake picklist and the condition tags each answer expands to.
pub async fn list_concerns(State(state): State<AppState>) -> Json<Vec<ConcernSummary>> {
    let concerns = state
        .kb
        .normalizer()
        .known_concerns()
        .map(|(concern, tags)| ConcernSummary {
            concern: concern.to_string(),
            tags: tags.to_vec(),
        })
        .collect();
    Json(concerns)
}
