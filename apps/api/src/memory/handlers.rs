//! Axum route handlers for memory stats and clearing.

use axum::{extract::State, http::StatusCode, Json};

use crate::errors::AppError;
use crate::memory::store::MemoryStats;
use crate::state::AppState;

/// GET /api/v1/memory/stats
///
/// Returns document/chunk counts and the on-disk size of the store.
pub async fn handle_memory_stats(State(state): State<AppState>) -> Json<MemoryStats> {
    Json(state.store.stats().await)
}

/// DELETE /api/v1/memory
///
/// Clears every stored document. Irreversible.
pub async fn handle_clear_memory(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    state
        .store
        .clear()
        .await
        .map_err(|e| AppError::Store(e.to_string()))?;
    tracing::info!("Document memory cleared");
    Ok(StatusCode::NO_CONTENT)
}
