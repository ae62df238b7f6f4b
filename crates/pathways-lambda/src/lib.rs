//! HTTP surface for the recommendation engine, served from AWS Lambda.

use axum::Router;
use axum::middleware as axum_mw;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;

use state::AppState;

/// Every route, with request auditing and permissive CORS.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/therapies", get(routes::therapies::list_therapies))
        .route("/therapies/{key}", get(routes::therapies::get_therapy))
        .route("/concerns", get(routes::concerns::list_concerns))
        .route(
            "/recommendations",
            post(routes::recommendations::create_recommendations),
        )
        .layer(axum_mw::from_fn(middleware::audit::audit_log))
        .layer(cors)
        .with_state(state)
}
