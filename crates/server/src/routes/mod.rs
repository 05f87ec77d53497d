pub mod dashboard;

use axum::Router;
use std::sync::Arc;

use crate::state::AppState;

/// Assemble the router: dashboard page, API and health check.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(dashboard::routes())
        .route("/health", axum::routing::get(health))
        .with_state(state)
}

async fn health() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({ "status": "ok" }))
}
