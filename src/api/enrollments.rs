use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use std::sync::Arc;

use super::validation::require_text;
use super::{ApiError, ApiJson, ApiResponse, AppState, MessageResponse};
use crate::models::{Enrollment, EnrollmentPatch, NewEnrollment};

/// GET /enrollments
pub async fn list_enrollments(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<Enrollment>>>, ApiError> {
    let enrollments = state.store.list_enrollments().await?;
    Ok(Json(ApiResponse::success(enrollments)))
}

/// GET /enrollments/{id}
pub async fn get_enrollment(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Enrollment>>, ApiError> {
    let enrollment = state
        .store
        .get_enrollment(&id)
        .await?
        .ok_or_else(|| ApiError::not_found("Enrollment"))?;

    Ok(Json(ApiResponse::success(enrollment)))
}

/// POST /enrollments
pub async fn create_enrollment(
    State(state): State<Arc<AppState>>,
    ApiJson(payload): ApiJson<NewEnrollment>,
) -> Result<(StatusCode, Json<ApiResponse<Enrollment>>), ApiError> {
    let new = NewEnrollment {
        name: require_text("name", &payload.name)?,
        class: require_text("class", &payload.class)?,
        phone: require_text("phone", &payload.phone)?,
        whatsapp: require_text("whatsapp", &payload.whatsapp)?,
        address: require_text("address", &payload.address)?,
    };

    let enrollment = state.store.create_enrollment(new).await?;
    metrics::counter!("enrollments_received_total").increment(1);

    Ok((StatusCode::CREATED, Json(ApiResponse::success(enrollment))))
}

/// PUT /enrollments/{id}
pub async fn update_enrollment(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    ApiJson(patch): ApiJson<EnrollmentPatch>,
) -> Result<Json<ApiResponse<Enrollment>>, ApiError> {
    let enrollment = state
        .store
        .update_enrollment(&id, patch)
        .await?
        .ok_or_else(|| ApiError::not_found("Enrollment"))?;

    Ok(Json(ApiResponse::success(enrollment)))
}

/// DELETE /enrollments/{id}
pub async fn delete_enrollment(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    if !state.store.delete_enrollment(&id).await? {
        return Err(ApiError::not_found("Enrollment"));
    }

    Ok(Json(ApiResponse::success(MessageResponse::new(
        "Enrollment deleted successfully",
    ))))
}
