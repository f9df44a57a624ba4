//! Axum route handlers for session lifecycle and manual document editing.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::document::patch::{ItemCollection, ItemField, PatchField, ReorderCollection};
use crate::document::preview::{self, Preview};
use crate::errors::AppError;
use crate::session::SessionView;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ItemUpdateRequest {
    pub collection: ItemCollection,
    pub item_id: String,
    pub field: ItemField,
    pub value: String,
}

#[derive(Debug, Deserialize)]
pub struct MoveRequest {
    pub collection: ReorderCollection,
    pub moving_id: String,
    pub target_id: String,
}

#[derive(Debug, Deserialize)]
pub struct SectionUpdateRequest {
    pub enabled: Option<bool>,
    pub title: Option<String>,
    pub content: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AddSectionResponse {
    pub section_id: String,
    pub session: SessionView,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/sessions
///
/// Creates a session seeded with the starter resume.
pub async fn handle_create_session(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<SessionView>), AppError> {
    let view = state.sessions.create().await;
    Ok((StatusCode::CREATED, Json(view)))
}

/// GET /api/v1/sessions/:id
pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>, AppError> {
    Ok(Json(state.sessions.view(id).await?))
}

/// GET /api/v1/sessions/:id/preview
///
/// Renders the document into the display-ready preview tree.
pub async fn handle_get_preview(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Preview>, AppError> {
    let preview = state
        .sessions
        .with_session(id, |session| Ok(preview::render(&session.document)))
        .await?;
    Ok(Json(preview))
}

/// PATCH /api/v1/sessions/:id/document
///
/// Applies a batch of field-level patches. Unknown field tags are rejected
/// at deserialization, before any patch in the batch is applied.
pub async fn handle_apply_patch(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(fields): Json<Vec<PatchField>>,
) -> Result<Json<SessionView>, AppError> {
    state
        .sessions
        .edit(id, |doc| {
            doc.apply_patch(fields);
            Ok(())
        })
        .await?;
    Ok(Json(state.sessions.view(id).await?))
}

/// POST /api/v1/sessions/:id/items/update
///
/// Sets one field of one item, addressed by collection and item id.
pub async fn handle_update_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<ItemUpdateRequest>,
) -> Result<Json<SessionView>, AppError> {
    state
        .sessions
        .edit(id, |doc| {
            doc.update_item(request.collection, &request.item_id, request.field, request.value)
        })
        .await?;
    Ok(Json(state.sessions.view(id).await?))
}

/// POST /api/v1/sessions/:id/items/move
///
/// Moves an item (or section) to the position of another, identified by id.
pub async fn handle_move_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<MoveRequest>,
) -> Result<Json<SessionView>, AppError> {
    state
        .sessions
        .edit(id, |doc| {
            doc.move_item(request.collection, &request.moving_id, &request.target_id);
            Ok(())
        })
        .await?;
    Ok(Json(state.sessions.view(id).await?))
}

/// POST /api/v1/sessions/:id/sections
///
/// Appends a new custom section and returns its generated id.
pub async fn handle_add_section(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<(StatusCode, Json<AddSectionResponse>), AppError> {
    let section_id = state
        .sessions
        .edit(id, |doc| Ok(doc.add_custom_section()))
        .await?;
    let session = state.sessions.view(id).await?;
    Ok((
        StatusCode::CREATED,
        Json(AddSectionResponse {
            section_id,
            session,
        }),
    ))
}

/// PATCH /api/v1/sessions/:id/sections/:section_id
///
/// Updates any combination of a section's enabled flag, title, and content.
pub async fn handle_update_section(
    State(state): State<AppState>,
    Path((id, section_id)): Path<(Uuid, String)>,
    Json(request): Json<SectionUpdateRequest>,
) -> Result<Json<SessionView>, AppError> {
    state
        .sessions
        .edit(id, |doc| {
            if let Some(enabled) = request.enabled {
                doc.set_section_enabled(&section_id, enabled);
            }
            if let Some(title) = request.title {
                doc.set_section_title(&section_id, title);
            }
            if let Some(content) = request.content {
                doc.set_section_content(&section_id, content);
            }
            Ok(())
        })
        .await?;
    Ok(Json(state.sessions.view(id).await?))
}

/// DELETE /api/v1/sessions/:id/sections/:section_id
///
/// Removes a custom section. Standard sections can only be disabled.
pub async fn handle_remove_section(
    State(state): State<AppState>,
    Path((id, section_id)): Path<(Uuid, String)>,
) -> Result<Json<SessionView>, AppError> {
    state
        .sessions
        .edit(id, |doc| doc.remove_section(&section_id))
        .await?;
    Ok(Json(state.sessions.view(id).await?))
}
