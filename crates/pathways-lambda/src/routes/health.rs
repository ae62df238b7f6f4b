use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    knowledge_base_version: u32,
    therapies: usize,
}

pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        knowledge_base_version: state.kb.format_version,
        therapies: state.kb.therapies.len(),
    })
}
