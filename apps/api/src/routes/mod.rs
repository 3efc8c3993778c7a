pub mod health;
pub mod ui;

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
    Router,
};

use crate::analysis::handlers as analysis;
use crate::documents::handlers as documents;
use crate::memory::handlers as memory;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    // Multipart bodies carry the PDF plus framing overhead; give them headroom
    // over the raw file cap (extraction enforces the real limit).
    let body_limit = state.config.max_upload_bytes + 64 * 1024;

    Router::new()
        .route("/", get(ui::ui_handler))
        .route("/health", get(health::health_handler))
        // Documents API
        .route("/api/v1/documents", post(documents::handle_upload))
        .route("/api/v1/documents", get(documents::handle_list_documents))
        .route("/api/v1/documents/:id", get(documents::handle_get_document))
        .route(
            "/api/v1/documents/:id",
            delete(documents::handle_delete_document),
        )
        .route(
            "/api/v1/documents/:id/reanalyze",
            post(documents::handle_reanalyze),
        )
        .route(
            "/api/v1/documents/:id/questions",
            get(analysis::handle_suggest_questions),
        )
        // Analysis API
        .route("/api/v1/ask", post(analysis::handle_ask))
        .route("/api/v1/ats-score", post(analysis::handle_ats_score))
        // Memory API
        .route("/api/v1/memory/stats", get(memory::handle_memory_stats))
        .route("/api/v1/memory", delete(memory::handle_clear_memory))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
