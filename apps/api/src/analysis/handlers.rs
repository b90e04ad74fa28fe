//! Axum route handlers for CV analysis and cover letters.

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::analysis::cover_letter::generate_cover_letter;
use crate::analysis::match_report::{analyze_match, MatchReport};
use crate::errors::AppError;
use crate::job_posting::truncate_chars;
use crate::state::AppState;

/// Characters of fetched posting text echoed back with an analysis.
pub const JOB_CONTENT_PREVIEW_CHARS: usize = 500;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct AnalyzeJobRequest {
    pub cv_content: String,
    pub job_posting_url: String,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeJobResponse {
    pub job_content: String,
    pub analysis: MatchReport,
}

#[derive(Debug, Deserialize)]
pub struct CoverLetterRequest {
    pub cv_content: String,
    pub job_posting_content: String,
    pub match_percentage: f64,
}

#[derive(Debug, Serialize)]
pub struct CoverLetterResponse {
    pub cover_letter: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/analyze-job
///
/// Fetches the posting, asks the LLM for a match report, and returns it with
/// a short preview of the fetched text.
pub async fn handle_analyze_job(
    State(state): State<AppState>,
    payload: Result<Json<AnalyzeJobRequest>, JsonRejection>,
) -> Result<Json<AnalyzeJobResponse>, AppError> {
    let Json(request) = payload?;

    if request.cv_content.trim().is_empty() {
        return Err(AppError::Validation("cv_content cannot be empty".to_string()));
    }
    if request.job_posting_url.trim().is_empty() {
        return Err(AppError::Validation("URL is required".to_string()));
    }

    let posting = state.fetcher.fetch(&request.job_posting_url).await?;
    let analysis = analyze_match(&request.cv_content, &posting.content, state.llm.as_ref()).await?;

    Ok(Json(AnalyzeJobResponse {
        job_content: truncate_chars(&posting.content, JOB_CONTENT_PREVIEW_CHARS).to_string(),
        analysis,
    }))
}

/// POST /api/generate-cover-letter
pub async fn handle_generate_cover_letter(
    State(state): State<AppState>,
    payload: Result<Json<CoverLetterRequest>, JsonRejection>,
) -> Result<Json<CoverLetterResponse>, AppError> {
    let Json(request) = payload?;

    if request.cv_content.trim().is_empty() {
        return Err(AppError::Validation("cv_content cannot be empty".to_string()));
    }

    let cover_letter = generate_cover_letter(
        &request.cv_content,
        &request.job_posting_content,
        request.match_percentage,
        state.llm.as_ref(),
    )
    .await?;

    Ok(Json(CoverLetterResponse { cover_letter }))
}
