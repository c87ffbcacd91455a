//! Axum route handlers for the AI endpoints.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

use crate::ai::ats::AtsReport;
use crate::ai::jd_parser::{parse_job_description, ParsedJobDescription, JOB_DESCRIPTION_REQUIRED};
use crate::ai::optimize::optimize_resume;
use crate::ai::suggestions::{generate_suggestions, SuggestionReport};
use crate::errors::AppError;
use crate::models::resume::ResumeData;
use crate::state::AppState;

pub const RESUME_DATA_REQUIRED: &str = "Resume data is required";

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizeRequest {
    pub resume_data: Option<ResumeData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionsRequest {
    pub resume_data: Option<ResumeData>,
    pub job_description: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseJobRequest {
    #[serde(default)]
    pub job_description: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AtsScoreRequest {
    pub resume_data: Option<ResumeData>,
    #[serde(default)]
    pub job_description: String,
}

fn require_resume(resume: Option<ResumeData>) -> Result<ResumeData, AppError> {
    resume.ok_or_else(|| AppError::MissingField(RESUME_DATA_REQUIRED.to_string()))
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/optimize-resume
///
/// Returns the model's JSON answer unchanged.
pub async fn handle_optimize_resume(
    State(state): State<AppState>,
    payload: Result<Json<OptimizeRequest>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let Json(request) = payload?;
    let resume = require_resume(request.resume_data)?;

    let optimized = optimize_resume(state.openai.as_ref(), &resume).await?;
    Ok(Json(optimized))
}

/// POST /api/gemini-optimize
///
/// Always answers with the suggestion report shape. Upstream and parse failures
/// produce the fallback report with 200; a bad request produces the fallback
/// report plus `error` with 500.
pub async fn handle_gemini_optimize(
    State(state): State<AppState>,
    payload: Result<Json<SuggestionsRequest>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            return outer_failure(AppError::from(rejection).to_string());
        }
    };

    let Some(resume) = request.resume_data else {
        return outer_failure(RESUME_DATA_REQUIRED.to_string());
    };

    let report = generate_suggestions(
        state.gemini.as_ref(),
        &resume,
        request.job_description.as_deref(),
    )
    .await;

    Json(report).into_response()
}

fn outer_failure(error: String) -> Response {
    warn!("Rejected suggestion request: {error}");
    let body = SuggestionReport::fallback(&ResumeData::default()).with_error(error);
    (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
}

/// POST /api/parse-job-description
pub async fn handle_parse_job_description(
    State(state): State<AppState>,
    payload: Result<Json<ParseJobRequest>, JsonRejection>,
) -> Result<Json<ParsedJobDescription>, AppError> {
    let Json(request) = payload?;

    let parsed = parse_job_description(state.openai.as_ref(), &request.job_description).await?;
    Ok(Json(parsed))
}

/// POST /api/ats-score
///
/// Deterministic keyword score; no model call.
pub async fn handle_ats_score(
    State(state): State<AppState>,
    payload: Result<Json<AtsScoreRequest>, JsonRejection>,
) -> Result<Json<AtsReport>, AppError> {
    let Json(request) = payload?;
    let resume = require_resume(request.resume_data)?;
    if request.job_description.trim().is_empty() {
        return Err(AppError::MissingField(JOB_DESCRIPTION_REQUIRED.to_string()));
    }

    let report = state
        .ats_scorer
        .score(&resume, &request.job_description)
        .await?;
    Ok(Json(report))
}
