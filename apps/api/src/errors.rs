use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::job_posting::FetchError;
use crate::llm_client::LlmError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
/// Every variant renders as `{ "detail": <message> }`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("Not Found")]
    NotFound,

    #[error("Method Not Allowed")]
    MethodNotAllowed,

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("LLM request failed: {0}")]
    Llm(#[from] LlmError),

    #[error("Invalid LLM response: {0}")]
    ResponseValidation(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::Fetch(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            AppError::Llm(_) | AppError::ResponseValidation(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let detail = self.to_string();

        match &self {
            AppError::NotFound | AppError::MethodNotAllowed => {
                tracing::debug!("Unrouted request ({status})");
            }
            AppError::Validation(_) | AppError::Fetch(_) => {
                tracing::warn!("Rejecting request ({status}): {detail}");
            }
            AppError::Internal(e) => tracing::error!("Internal error: {e:?}"),
            _ => tracing::error!("{detail}"),
        }

        (status, Json(json!({ "detail": detail }))).into_response()
    }
}
