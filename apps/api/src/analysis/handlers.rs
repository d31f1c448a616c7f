//! Axum route handlers for synchronous, text-only analysis.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::analysis::jd_parser::parse_jd;
use crate::analysis::models::{AnalysisResult, ParsedJD, ParsedResume};
use crate::analysis::resume_parser::parse_resume;
use crate::analysis::run_analysis;
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AnalyzeTextRequest {
    pub jd_text: String,
    #[serde(default)]
    pub resume_text: String,
}

#[derive(Debug, Deserialize)]
pub struct ParseJdRequest {
    pub jd_text: String,
}

#[derive(Debug, Deserialize)]
pub struct ParseResumeRequest {
    pub resume_text: String,
}

#[derive(Debug, Serialize)]
pub struct ParseJdResponse {
    pub parsed_jd: ParsedJD,
}

#[derive(Debug, Serialize)]
pub struct ParseResumeResponse {
    pub parsed_resume: ParsedResume,
}

/// POST /api/v1/analyze/text
///
/// Same analysis as the upload flow, but on already-extracted text and
/// answered inline.
pub async fn handle_analyze_text(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeTextRequest>,
) -> Result<Json<AnalysisResult>, AppError> {
    if request.jd_text.trim().is_empty() {
        return Err(AppError::Validation("jd_text cannot be empty".to_string()));
    }

    let (result, _) = run_analysis(&state.taxonomy, &request.jd_text, &request.resume_text);
    Ok(Json(result))
}

/// POST /api/v1/parse/jd
pub async fn handle_parse_jd(
    State(state): State<AppState>,
    Json(request): Json<ParseJdRequest>,
) -> Result<Json<ParseJdResponse>, AppError> {
    if request.jd_text.trim().is_empty() {
        return Err(AppError::Validation("jd_text cannot be empty".to_string()));
    }

    let parsed_jd = parse_jd(&request.jd_text, &state.taxonomy);
    Ok(Json(ParseJdResponse { parsed_jd }))
}

/// POST /api/v1/parse/resume
pub async fn handle_parse_resume(
    State(state): State<AppState>,
    Json(request): Json<ParseResumeRequest>,
) -> Json<ParseResumeResponse> {
    let parsed_resume = parse_resume(&request.resume_text, &state.taxonomy);
    Json(ParseResumeResponse { parsed_resume })
}
