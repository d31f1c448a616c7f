//! Axum route handlers for upload-based analysis jobs.

use axum::{
    extract::{Multipart, Path, State},
    Json,
};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::extraction::UploadedFile;
use crate::jobs::store::JobRecord;
use crate::jobs::worker::spawn_job;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub job_id: Uuid,
}

/// POST /api/v1/analyze
///
/// Multipart form with `jd_text` and `resume_file`. Queues the analysis and
/// returns the job id; poll `/api/v1/status/:job_id` for the result.
pub async fn handle_analyze(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let mut jd_text: Option<String> = None;
    let mut file: Option<UploadedFile> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("jd_text") => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("Unreadable jd_text: {e}")))?;
                jd_text = Some(text);
            }
            Some("resume_file") => {
                let file_name = field.file_name().map(String::from);
                let content_type = field.content_type().map(String::from);
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Unreadable resume_file: {e}")))?;
                file = Some(UploadedFile {
                    file_name,
                    content_type,
                    bytes: bytes.to_vec(),
                });
            }
            _ => {}
        }
    }

    let (jd_text, file) = match (jd_text, file) {
        (Some(jd), Some(file)) if !jd.trim().is_empty() => (jd, file),
        _ => {
            return Err(AppError::Validation(
                "jd_text and resume_file are required".to_string(),
            ))
        }
    };
    if file.bytes.is_empty() {
        return Err(AppError::UnprocessableEntity(
            "resume_file is empty".to_string(),
        ));
    }

    let job = state.jobs.create(&jd_text).await;
    info!(job_id = %job.id, bytes = file.bytes.len(), "analysis job queued");

    spawn_job(
        state.jobs.clone(),
        state.taxonomy.clone(),
        job.id,
        jd_text,
        file,
    );

    Ok(Json(AnalyzeResponse { job_id: job.id }))
}

/// GET /api/v1/status/:job_id
pub async fn handle_status(
    State(state): State<AppState>,
    Path(job_id): Path<Uuid>,
) -> Result<Json<JobRecord>, AppError> {
    state
        .jobs
        .get(job_id)
        .await
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Job {job_id} not found")))
}
