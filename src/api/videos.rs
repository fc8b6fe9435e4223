use axum::{
    Json,
    extract::{Path, Query, State},
};
use std::sync::Arc;

use super::validation::{ContentQuery, non_empty, require_text, validate_class};
use super::{ApiError, ApiJson, ApiResponse, AppState, MessageResponse};
use crate::models::{NewVideo, Video, VideoPatch};

/// GET /videos?class&subject
pub async fn list_videos(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ContentQuery>,
) -> Result<Json<ApiResponse<Vec<Video>>>, ApiError> {
    let filter = query.video_filter()?;
    let videos = state.store.list_videos(&filter).await?;
    Ok(Json(ApiResponse::success(videos)))
}

/// GET /videos/{id}
pub async fn get_video(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Video>>, ApiError> {
    let video = state
        .store
        .get_video(&id)
        .await?
        .ok_or_else(|| ApiError::not_found("Video"))?;

    Ok(Json(ApiResponse::success(video)))
}

/// POST /videos
pub async fn create_video(
    State(state): State<Arc<AppState>>,
    ApiJson(payload): ApiJson<NewVideo>,
) -> Result<Json<ApiResponse<Video>>, ApiError> {
    let new = NewVideo {
        title: require_text("title", &payload.title)?,
        class: validate_class(payload.class)?,
        subject: require_text("subject", &payload.subject)?,
        youtube_url: require_text("youtubeUrl", &payload.youtube_url)?,
        description: non_empty(payload.description),
        thumbnail_url: non_empty(payload.thumbnail_url),
        duration: non_empty(payload.duration),
        upload_date: non_empty(payload.upload_date),
        category: non_empty(payload.category),
        views: payload.views,
    };

    let video = state.store.create_video(new).await?;
    Ok(Json(ApiResponse::success(video)))
}

/// PUT /videos/{id}
pub async fn update_video(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    ApiJson(patch): ApiJson<VideoPatch>,
) -> Result<Json<ApiResponse<Video>>, ApiError> {
    if let Some(class) = patch.class {
        validate_class(class)?;
    }
    if let Some(title) = &patch.title {
        require_text("title", title)?;
    }
    if let Some(subject) = &patch.subject {
        require_text("subject", subject)?;
    }
    if let Some(youtube_url) = &patch.youtube_url {
        require_text("youtubeUrl", youtube_url)?;
    }

    let video = state
        .store
        .update_video(&id, patch)
        .await?
        .ok_or_else(|| ApiError::not_found("Video"))?;

    Ok(Json(ApiResponse::success(video)))
}

/// DELETE /videos/{id}
pub async fn delete_video(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    if !state.store.delete_video(&id).await? {
        return Err(ApiError::not_found("Video"));
    }

    Ok(Json(ApiResponse::success(MessageResponse::new(
        "Video deleted successfully",
    ))))
}
