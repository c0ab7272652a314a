//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode};

use crate::{infrastructure::dto::http::RoomStatusDto, ui::state::AppState};

/// Body of every failed room status response; details stay in the server log
pub const INTERNAL_SERVER_ERROR_BODY: &str = "Internal Server Error";

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Get participant count of the configured room
pub async fn get_room_status(
    State(state): State<Arc<AppState>>,
) -> Result<Json<RoomStatusDto>, (StatusCode, &'static str)> {
    match state.get_room_status_usecase.execute().await {
        // Domain Model から DTO への変換
        Ok(room) => Ok(Json(RoomStatusDto::from(room))),
        // 詳細はユースケース側でログ出力済み
        Err(_) => Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            INTERNAL_SERVER_ERROR_BODY,
        )),
    }
}
