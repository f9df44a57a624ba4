use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::flows::types::TaskKind;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Every variant is non-fatal to the session: the document is never left
/// partially mutated by a failed operation.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("A {} task is already in flight", .0.as_str())]
    TaskInFlight(TaskKind),

    #[error("Document extraction failed: {0}")]
    Extraction(String),

    #[error("The {} task failed: {message}", .task.as_str())]
    Llm { task: TaskKind, message: String },

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Wraps a client-level LLM failure, tagging it with the task that ran.
    pub fn llm(task: TaskKind, source: crate::llm_client::LlmError) -> Self {
        AppError::Llm {
            task,
            message: source.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::TaskInFlight(kind) => (
                StatusCode::CONFLICT,
                "TASK_IN_FLIGHT",
                format!("A {} task is already in flight", kind.as_str()),
            ),
            AppError::Extraction(msg) => {
                tracing::warn!("Extraction error: {msg}");
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "EXTRACTION_ERROR",
                    "Could not read the uploaded document".to_string(),
                )
            }
            AppError::Llm { task, message } => {
                tracing::error!("LLM error in {} task: {message}", task.as_str());
                (
                    StatusCode::BAD_GATEWAY,
                    "LLM_ERROR",
                    format!("The {} task failed; the resume was left unchanged", task.as_str()),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
