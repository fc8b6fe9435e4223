use axum::{
    Json,
    extract::{Multipart, Path, Query, State},
};
use std::sync::Arc;

use super::multipart::UploadForm;
use super::validation::{ContentQuery, parse_int, parse_phase, require_text, validate_class};
use super::{
    ApiError, ApiJson, ApiResponse, AppState, FileUrlResponse, MessageResponse,
};
use crate::models::{NewQuestionPaper, QuestionPaper, QuestionPaperPatch};
use crate::uploads::UploadKind;

/// GET /question-papers?class&subject&year&phase
pub async fn list_question_papers(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ContentQuery>,
) -> Result<Json<ApiResponse<Vec<QuestionPaper>>>, ApiError> {
    let filter = query.paper_filter()?;
    let papers = state.store.list_question_papers(&filter).await?;
    Ok(Json(ApiResponse::success(papers)))
}

/// GET /question-papers/{id}
pub async fn get_question_paper(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<QuestionPaper>>, ApiError> {
    let paper = state
        .store
        .get_question_paper(&id)
        .await?
        .ok_or_else(|| ApiError::not_found("Question paper"))?;

    Ok(Json(ApiResponse::success(paper)))
}

/// GET /question-papers/download/{id}
pub async fn download_question_paper(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<FileUrlResponse>>, ApiError> {
    let paper = state
        .store
        .get_question_paper(&id)
        .await?
        .ok_or_else(|| ApiError::not_found("Question paper"))?;

    Ok(Json(ApiResponse::success(FileUrlResponse {
        file_url: paper.file_url,
    })))
}

/// POST /question-papers (multipart: `file` plus title, class, subject, year, phase)
pub async fn create_question_paper(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<ApiResponse<QuestionPaper>>, ApiError> {
    let mut form = UploadForm::read(&mut multipart).await?;
    let file = form.take_file()?;

    let title = form.required("title")?;
    let class = validate_class(parse_int("class", &form.required("class")?)?)?;
    let subject = form.required("subject")?;
    let year = parse_int("year", &form.required("year")?)?;
    let phase = parse_phase(&form.required("phase")?)?;

    let file_url = state
        .uploads
        .save_pdf(
            UploadKind::Paper,
            file.file_name.as_deref(),
            file.content_type.as_deref(),
            &file.bytes,
        )
        .await?;

    let paper = state
        .store
        .create_question_paper(NewQuestionPaper {
            title,
            class,
            subject,
            year,
            phase,
            file_url,
        })
        .await?;

    Ok(Json(ApiResponse::success(paper)))
}

/// PUT /question-papers/{id}
pub async fn update_question_paper(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    ApiJson(patch): ApiJson<QuestionPaperPatch>,
) -> Result<Json<ApiResponse<QuestionPaper>>, ApiError> {
    if let Some(class) = patch.class {
        validate_class(class)?;
    }
    if let Some(title) = &patch.title {
        require_text("title", title)?;
    }
    if let Some(subject) = &patch.subject {
        require_text("subject", subject)?;
    }

    let paper = state
        .store
        .update_question_paper(&id, patch)
        .await?
        .ok_or_else(|| ApiError::not_found("Question paper"))?;

    Ok(Json(ApiResponse::success(paper)))
}

/// DELETE /question-papers/{id}
pub async fn delete_question_paper(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    if !state.store.delete_question_paper(&id).await? {
        return Err(ApiError::not_found("Question paper"));
    }

    Ok(Json(ApiResponse::success(MessageResponse::new(
        "Question paper deleted successfully",
    ))))
}
