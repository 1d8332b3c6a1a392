//! History and settings endpoints for the composer UI.
//!
//! GET /api/history, DELETE /api/history, DELETE /api/history/{id},
//! GET /api/settings

use super::ApiError;
use crate::state::AppState;
use axum::extract::{Path, State};
use axum::response::Json;
use idearelay_core::history::HistoryEntry;
use idearelay_core::settings::Settings;
use serde::Serialize;

#[derive(Serialize)]
pub struct DeletedResponse {
    pub success: bool,
}

/// Returns the retained history, newest first.
pub async fn list_history(
    State(state): State<AppState>,
) -> Result<Json<Vec<HistoryEntry>>, ApiError> {
    Ok(Json(state.history.load().await?))
}

/// Deletes one history entry.
pub async fn delete_history_entry(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeletedResponse>, ApiError> {
    state.history.delete(&id).await?;
    Ok(Json(DeletedResponse { success: true }))
}

/// Deletes the entire history.
pub async fn clear_history(
    State(state): State<AppState>,
) -> Result<Json<DeletedResponse>, ApiError> {
    state.history.clear().await?;
    Ok(Json(DeletedResponse { success: true }))
}

/// Returns the last-used composer settings.
pub async fn get_settings(State(state): State<AppState>) -> Result<Json<Settings>, ApiError> {
    Ok(Json(state.settings.load().await?))
}
