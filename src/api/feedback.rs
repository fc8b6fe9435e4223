use axum::{
    Json,
    extract::{Path, State},
};
use std::sync::Arc;

use super::validation::{non_empty, require_text, validate_rating};
use super::{ApiError, ApiJson, ApiResponse, AppState, MessageResponse};
use crate::models::{Feedback, NewFeedback};

/// GET /feedback
pub async fn list_feedback(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<Feedback>>>, ApiError> {
    let feedback = state.store.list_feedback().await?;
    Ok(Json(ApiResponse::success(feedback)))
}

/// POST /feedback
pub async fn create_feedback(
    State(state): State<Arc<AppState>>,
    ApiJson(payload): ApiJson<NewFeedback>,
) -> Result<Json<ApiResponse<Feedback>>, ApiError> {
    let new = NewFeedback {
        name: require_text("name", &payload.name)?,
        email: non_empty(payload.email),
        message: require_text("message", &payload.message)?,
        rating: validate_rating(payload.rating)?,
    };

    let feedback = state.store.create_feedback(new).await?;
    metrics::counter!("feedback_submitted_total").increment(1);

    Ok(Json(ApiResponse::success(feedback)))
}

/// DELETE /feedback/{id}
pub async fn delete_feedback(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    if !state.store.delete_feedback(&id).await? {
        return Err(ApiError::not_found("Feedback"));
    }

    Ok(Json(ApiResponse::success(MessageResponse::new(
        "Feedback deleted successfully",
    ))))
}
