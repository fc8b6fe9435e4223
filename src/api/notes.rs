use axum::{
    Json,
    extract::{Multipart, Path, Query, State},
};
use std::sync::Arc;

use super::multipart::UploadForm;
use super::validation::{ContentQuery, parse_int, require_text, validate_class};
use super::{
    ApiError, ApiJson, ApiResponse, AppState, FileUrlResponse, MessageResponse,
};
use crate::models::{NewNote, Note, NotePatch};
use crate::uploads::UploadKind;

/// GET /notes?class&subject
pub async fn list_notes(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ContentQuery>,
) -> Result<Json<ApiResponse<Vec<Note>>>, ApiError> {
    let filter = query.note_filter()?;
    let notes = state.store.list_notes(&filter).await?;
    Ok(Json(ApiResponse::success(notes)))
}

/// GET /notes/{id}
pub async fn get_note(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Note>>, ApiError> {
    let note = state
        .store
        .get_note(&id)
        .await?
        .ok_or_else(|| ApiError::not_found("Note"))?;

    Ok(Json(ApiResponse::success(note)))
}

/// GET /notes/download/{id}
pub async fn download_note(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<FileUrlResponse>>, ApiError> {
    let note = state
        .store
        .get_note(&id)
        .await?
        .ok_or_else(|| ApiError::not_found("Note"))?;

    Ok(Json(ApiResponse::success(FileUrlResponse {
        file_url: note.file_url,
    })))
}

/// POST /notes (multipart: `file` plus title, description, class, subject)
pub async fn create_note(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<ApiResponse<Note>>, ApiError> {
    let mut form = UploadForm::read(&mut multipart).await?;
    let file = form.take_file()?;

    let title = form.required("title")?;
    let description = form.optional("description");
    let class = validate_class(parse_int("class", &form.required("class")?)?)?;
    let subject = form.required("subject")?;

    let file_url = state
        .uploads
        .save_pdf(
            UploadKind::Note,
            file.file_name.as_deref(),
            file.content_type.as_deref(),
            &file.bytes,
        )
        .await?;

    let note = state
        .store
        .create_note(NewNote {
            title,
            description,
            class,
            subject,
            file_url,
        })
        .await?;

    Ok(Json(ApiResponse::success(note)))
}

/// PUT /notes/{id}
pub async fn update_note(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    ApiJson(patch): ApiJson<NotePatch>,
) -> Result<Json<ApiResponse<Note>>, ApiError> {
    if let Some(class) = patch.class {
        validate_class(class)?;
    }
    if let Some(title) = &patch.title {
        require_text("title", title)?;
    }
    if let Some(subject) = &patch.subject {
        require_text("subject", subject)?;
    }

    let note = state
        .store
        .update_note(&id, patch)
        .await?
        .ok_or_else(|| ApiError::not_found("Note"))?;

    Ok(Json(ApiResponse::success(note)))
}

/// DELETE /notes/{id}
pub async fn delete_note(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    if !state.store.delete_note(&id).await? {
        return Err(ApiError::not_found("Note"));
    }

    Ok(Json(ApiResponse::success(MessageResponse::new(
        "Note deleted successfully",
    ))))
}
