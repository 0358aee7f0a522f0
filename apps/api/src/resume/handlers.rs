use axum::{
    extract::State,
    http::{header, HeaderValue, StatusCode},
    response::{Html, IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::info;

use crate::config::attachment_disposition;
use crate::errors::AppError;
use crate::export::export_pdf;
use crate::models::resume::ResumeRecord;
use crate::render::RecordSource;
use crate::resume::{load_for_display, load_or_sample, save_record};
use crate::state::AppState;

#[derive(Serialize)]
pub struct ResumeResponse {
    pub source: RecordSource,
    pub resume: ResumeRecord,
}

/// GET /resume
pub async fn handle_resume_page(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let (record, source) = load_for_display(state.store.as_ref(), state.storage_key()).await?;
    let html = state.templates.render_resume(&record, source)?;
    Ok(Html(html))
}

/// GET /resume.pdf and GET /api/v1/resume/pdf
pub async fn handle_resume_pdf(State(state): State<AppState>) -> Result<Response, AppError> {
    let (record, source) = load_for_display(state.store.as_ref(), state.storage_key()).await?;
    let bytes = export_pdf(record, state.geometry).await?;
    info!(?source, bytes = bytes.len(), "Serving resume PDF");

    let disposition = attachment_disposition(&state.config.pdf_filename)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Invalid PDF_FILENAME header: {e}")))?;
    Ok((
        [
            (header::CONTENT_TYPE, HeaderValue::from_static("application/pdf")),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    )
        .into_response())
}

/// GET /api/v1/resume
pub async fn handle_get_resume(
    State(state): State<AppState>,
) -> Result<Json<ResumeResponse>, AppError> {
    let (resume, source) = load_or_sample(state.store.as_ref(), state.storage_key()).await?;
    Ok(Json(ResumeResponse { source, resume }))
}

/// PUT /api/v1/resume
pub async fn handle_put_resume(
    State(state): State<AppState>,
    Json(record): Json<ResumeRecord>,
) -> Result<Json<ResumeResponse>, AppError> {
    save_record(state.store.as_ref(), state.storage_key(), &record).await?;
    Ok(Json(ResumeResponse {
        source: RecordSource::Stored,
        resume: record,
    }))
}

/// DELETE /api/v1/resume
pub async fn handle_delete_resume(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    state.store.clear(state.storage_key()).await?;
    info!(key = %state.storage_key(), "Cleared saved resume");
    Ok(StatusCode::NO_CONTENT)
}
