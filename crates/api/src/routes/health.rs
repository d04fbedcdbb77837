//! Root-level service routes: the API index and the health check.

use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// `"ok"` or `"degraded"`.
    pub status: &'static str,
    pub version: &'static str,
    pub db_healthy: bool,
}

/// API index payload.
#[derive(Serialize)]
pub struct IndexResponse {
    pub name: &'static str,
    pub version: &'static str,
    pub endpoints: &'static [&'static str],
}

const ENDPOINT_GROUPS: &[&str] = &[
    "/health",
    "/api/v1/auth",
    "/api/v1/decks",
    "/api/v1/flashcards",
    "/api/v1/folders",
    "/api/v1/tasks",
];

/// GET /health
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = recallr_db::health_check(&state.pool).await.is_ok();
    if !db_healthy {
        tracing::warn!("Health check: database unreachable");
    }

    Json(HealthResponse {
        status: if db_healthy { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
    })
}

/// GET /
async fn index() -> Json<IndexResponse> {
    Json(IndexResponse {
        name: "Recallr API",
        version: env!("CARGO_PKG_VERSION"),
        endpoints: ENDPOINT_GROUPS,
    })
}

/// Mount root-level routes (not under `/api/v1`).
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health_check))
}
