//! Axum route handlers for the AI flows. These are thin shells: request
//! decoding here, all lifecycle and merge rules in the orchestrator.

use axum::{
    extract::{Multipart, Path, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::session::SessionView;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ParseRequest {
    pub resume_text: String,
}

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    pub description: String,
}

#[derive(Debug, Deserialize)]
pub struct ScoreRequest {
    pub job_description: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/sessions/:id/ai/parse
pub async fn handle_parse(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<ParseRequest>,
) -> Result<Json<SessionView>, AppError> {
    let view = state.orchestrator.run_parse(id, &request.resume_text).await?;
    Ok(Json(view))
}

/// POST /api/v1/sessions/:id/ai/import
///
/// Multipart upload; the PDF goes in a part named `file`.
pub async fn handle_import(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    mut multipart: Multipart,
) -> Result<Json<SessionView>, AppError> {
    let mut pdf_bytes = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        if field.name() == Some("file") {
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::Validation(format!("Could not read upload: {e}")))?;
            pdf_bytes = Some(bytes);
        }
    }

    let bytes = pdf_bytes
        .ok_or_else(|| AppError::Validation("Missing `file` part in upload".to_string()))?;

    let view = state.orchestrator.run_import(id, &bytes).await?;
    Ok(Json(view))
}

/// POST /api/v1/sessions/:id/ai/generate
pub async fn handle_generate(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<SessionView>, AppError> {
    let view = state
        .orchestrator
        .run_generate(id, &request.description)
        .await?;
    Ok(Json(view))
}

/// POST /api/v1/sessions/:id/ai/score
pub async fn handle_score(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<ScoreRequest>,
) -> Result<Json<SessionView>, AppError> {
    let view = state
        .orchestrator
        .run_score(id, &request.job_description)
        .await?;
    Ok(Json(view))
}

/// POST /api/v1/sessions/:id/ai/analyze
pub async fn handle_analyze(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>, AppError> {
    Ok(Json(state.orchestrator.run_analyze(id).await?))
}

/// POST /api/v1/sessions/:id/ai/apply-fixes
pub async fn handle_apply_fixes(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>, AppError> {
    Ok(Json(state.orchestrator.run_apply_fixes(id).await?))
}
