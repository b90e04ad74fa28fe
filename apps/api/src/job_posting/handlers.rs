use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct FetchJobPostingRequest {
    /// Missing and empty are treated the same.
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Serialize)]
pub struct FetchJobPostingResponse {
    pub content: String,
    pub url: String,
}

/// POST /api/fetch-job-posting
pub async fn handle_fetch_job_posting(
    State(state): State<AppState>,
    payload: Result<Json<FetchJobPostingRequest>, JsonRejection>,
) -> Result<Json<FetchJobPostingResponse>, AppError> {
    let Json(request) = payload?;

    if request.url.trim().is_empty() {
        return Err(AppError::Validation("URL is required".to_string()));
    }

    let posting = state.fetcher.fetch(&request.url).await?;

    Ok(Json(FetchJobPostingResponse {
        content: posting.content,
        url: request.url,
    }))
}
