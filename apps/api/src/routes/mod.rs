pub mod health;

use axum::{
    routing::{get, patch, post},
    Router,
};

use crate::document::handlers as document_handlers;
use crate::flows::handlers as flow_handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Session lifecycle
        .route(
            "/api/v1/sessions",
            post(document_handlers::handle_create_session),
        )
        .route(
            "/api/v1/sessions/:id",
            get(document_handlers::handle_get_session),
        )
        .route(
            "/api/v1/sessions/:id/preview",
            get(document_handlers::handle_get_preview),
        )
        // Manual editing
        .route(
            "/api/v1/sessions/:id/document",
            patch(document_handlers::handle_apply_patch),
        )
        .route(
            "/api/v1/sessions/:id/items/update",
            post(document_handlers::handle_update_item),
        )
        .route(
            "/api/v1/sessions/:id/items/move",
            post(document_handlers::handle_move_item),
        )
        .route(
            "/api/v1/sessions/:id/sections",
            post(document_handlers::handle_add_section),
        )
        .route(
            "/api/v1/sessions/:id/sections/:section_id",
            patch(document_handlers::handle_update_section)
                .delete(document_handlers::handle_remove_section),
        )
        // AI flows
        .route(
            "/api/v1/sessions/:id/ai/parse",
            post(flow_handlers::handle_parse),
        )
        .route(
            "/api/v1/sessions/:id/ai/import",
            post(flow_handlers::handle_import),
        )
        .route(
            "/api/v1/sessions/:id/ai/generate",
            post(flow_handlers::handle_generate),
        )
        .route(
            "/api/v1/sessions/:id/ai/score",
            post(flow_handlers::handle_score),
        )
        .route(
            "/api/v1/sessions/:id/ai/analyze",
            post(flow_handlers::handle_analyze),
        )
        .route(
            "/api/v1/sessions/:id/ai/apply-fixes",
            post(flow_handlers::handle_apply_fixes),
        )
        .with_state(state)
}
