//! User stats endpoints

use axum::{extract::State, Extension, Json};
use serde_json::Value;

use crate::error::Result;
use crate::models::{DefaultStats, SuccessResponse};
use crate::routes::auth::AuthenticatedUser;
use crate::services::storage::StorageError;
use crate::AppState;

/// GET /api/stats
pub async fn get_stats(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
) -> Result<Json<Value>> {
    if let Some(raw) = state.store.get(&auth.email)? {
        match serde_json::from_str(&raw) {
            Ok(stats) => return Ok(Json(stats)),
            Err(err) => tracing::warn!("Stored stats for {} unreadable: {}", auth.email, err),
        }
    }

    let defaults = serde_json::to_value(DefaultStats::for_user(&auth.email))
        .map_err(StorageError::from)?;
    Ok(Json(defaults))
}

/// POST /api/stats
pub async fn put_stats(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Json(body): Json<Value>,
) -> Result<Json<SuccessResponse>> {
    let raw = serde_json::to_string(&body).map_err(StorageError::from)?;
    state.store.put(&auth.email, raw)?;
    Ok(Json(SuccessResponse { success: true }))
}
