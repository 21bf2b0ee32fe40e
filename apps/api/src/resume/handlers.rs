//! Axum route handlers for resume ingestion and export.

use axum::{
    extract::{Multipart, Query, State},
    http::header,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use tokio::task::JoinError;
use tracing::info;

use crate::errors::AppError;
use crate::export::ExportFormat;
use crate::models::resume::ResumeRecord;
use crate::resume::loader::{extract_pdf_text, load_resume, LoadedResume};
use crate::state::AppState;

/// Multipart field carrying the PDF.
const UPLOAD_FIELD: &str = "resume";

#[derive(Debug, Deserialize)]
pub struct ParseResumeRequest {
    pub raw_text: String,
}

#[derive(Debug, Deserialize)]
pub struct ExportRequest {
    pub resume: ResumeRecord,
}

#[derive(Debug, Default, Deserialize)]
pub struct ExportQuery {
    #[serde(default)]
    pub format: ExportFormat,
}

/// POST /api/v1/resumes/parse
///
/// Segments already-extracted resume text.
pub async fn handle_parse_resume(
    State(state): State<AppState>,
    Json(request): Json<ParseResumeRequest>,
) -> Result<Json<LoadedResume>, AppError> {
    let loaded = load_resume(&request.raw_text, &state.segmenter)?;
    Ok(Json(loaded))
}

/// POST /api/v1/resumes/upload
///
/// Accepts a multipart PDF in the `resume` field, extracts its text and segments it.
pub async fn handle_upload_resume(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<LoadedResume>, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }

        let file_name = field.file_name().unwrap_or_default().to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Invalid file upload: {e}")))?;

        info!("Extracting text from {} ({} bytes)", file_name, data.len());

        // pdf-extract is CPU-bound and may panic on malformed input.
        let name = file_name.clone();
        let joined = tokio::task::spawn_blocking(move || extract_pdf_text(&name, &data)).await;
        let text = extraction_outcome(&file_name, joined)?;

        let loaded = load_resume(&text, &state.segmenter)?;
        return Ok(Json(loaded));
    }

    Err(AppError::InputMissing(format!(
        "multipart field '{UPLOAD_FIELD}' is missing"
    )))
}

/// Maps the blocking extraction task's result. A panic inside the PDF parser
/// is an extraction failure for this document; a cancelled task is internal.
fn extraction_outcome(
    file_name: &str,
    joined: Result<Result<String, AppError>, JoinError>,
) -> Result<String, AppError> {
    match joined {
        Ok(result) => result,
        Err(e) if e.is_panic() => Err(AppError::ExtractionFailed(format!(
            "PDF extraction aborted for {file_name}"
        ))),
        Err(e) => Err(AppError::Internal(anyhow::anyhow!(
            "extraction task cancelled: {e}"
        ))),
    }
}

/// POST /api/v1/resumes/export?format=text|markdown
///
/// Renders a resume record (original or tailored) as a document body.
pub async fn handle_export_resume(
    Query(query): Query<ExportQuery>,
    Json(request): Json<ExportRequest>,
) -> Result<impl IntoResponse, AppError> {
    let writer = query.format.writer();
    let body = writer
        .write(&request.resume)
        .map_err(|e| AppError::Validation(e.to_string()))?;

    Ok(([(header::CONTENT_TYPE, writer.content_type())], body))
}
