use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

use crate::api::error::ApiError;
use crate::api::server::AppState;
use crate::db::models::User;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub username: String,
    pub telegram_id: String,
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub success: bool,
}

/// POST /api/register
pub async fn register(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<Json<RegisterResponse>, ApiError> {
    let Json(payload) = payload?;

    let _guard = state.store.lock().await;
    let mut db = state.store.read_all().await?;

    if db.is_registered(&payload.telegram_id) {
        tracing::warn!("duplicate registration for telegram id {}", payload.telegram_id);
        return Err(ApiError::AlreadyRegistered);
    }

    tracing::info!(
        "registering {} (telegram id {})",
        payload.username,
        payload.telegram_id
    );
    db.push(User::new(payload.username, payload.telegram_id));
    state.store.write_all(&db).await?;

    Ok(Json(RegisterResponse { success: true }))
}

/// GET /api/registrations
pub async fn list(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Value>>, ApiError> {
    let db = state.store.read_all().await?;
    Ok(Json(db.users))
}
