use std::sync::Arc;

use pathways_core::models::profile::ProfileDefaults;
use pathways_recommend::KnowledgeBase;

/// Shared application state, injected into all route handlers via Axum state.
///
/// The knowledge base is read-only after startup, so handlers share it
/// without locking.
#[derive(Clone)]
pub struct AppState {
    pub kb: Arc<KnowledgeBase>,
    pub defaults: ProfileDefaults,
}
