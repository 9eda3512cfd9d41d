use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;
use tubely_core::storage::ThumbnailStorageKind;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Overall service status.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    /// Whether the video store is reachable.
    pub db_healthy: bool,
    /// Active thumbnail storage strategy.
    pub thumbnail_storage: ThumbnailStorageKind,
}

/// GET /health -- returns service and database health.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = state.videos.ping().await.is_ok();

    let status = if db_healthy { "ok" } else { "degraded" };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
        thumbnail_storage: state.thumbnails.kind(),
    })
}

/// Mount health check routes (intended for root-level, NOT under `/api`).
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
