use axum::{
    Json,
    extract::{Path, State},
};
use std::sync::Arc;
use tracing::info;

use super::{ApiError, ApiResponse, AppState, MessageResponse};
use crate::models::User;

/// GET /users
pub async fn list_users(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<User>>>, ApiError> {
    let users = state.store.list_users().await?;
    Ok(Json(ApiResponse::success(users)))
}

/// DELETE /users/{id}
///
/// The admin account reports 404 like an unknown id.
pub async fn delete_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    if !state.store.delete_user(&id).await? {
        return Err(ApiError::not_found("User"));
    }

    info!(user_id = %id, "Deleted user");

    Ok(Json(ApiResponse::success(MessageResponse::new(
        "User deleted successfully",
    ))))
}
