use axum::{Json, extract::State};
use std::sync::Arc;

use super::{ApiResponse, AppState, HealthResponse};
use crate::models::ContentStats;

/// GET /stats
///
/// Never fails; a store fault shows up as zero counts.
pub async fn get_stats(State(state): State<Arc<AppState>>) -> Json<ApiResponse<ContentStats>> {
    Json(ApiResponse::success(state.store.stats().await))
}

/// GET /health
pub async fn health(State(state): State<Arc<AppState>>) -> Json<ApiResponse<HealthResponse>> {
    Json(ApiResponse::success(HealthResponse {
        status: "ok",
        backend: state.store.backend(),
        version: env!("CARGO_PKG_VERSION"),
        uptime_seconds: state.start_time.elapsed().as_secs(),
    }))
}
