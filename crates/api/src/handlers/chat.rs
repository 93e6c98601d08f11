//! Handlers for the `/chat` resource (transcript load and save).

use axum::extract::{Query, State};
use helio_core::chat::{ChatMessage, OwnerKey};
use helio_core::types::DbId;
use helio_db::repositories::ChatRepo;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::extract::Json;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Query parameters for `GET /api/chat`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatQuery {
    pub user_id: Option<DbId>,
    pub session_id: Option<String>,
}

/// Request body for `POST /api/chat`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveChatRequest {
    pub user_id: Option<DbId>,
    pub session_id: Option<String>,
    /// The complete transcript. Replaces whatever was stored before.
    pub messages: Vec<ChatMessage>,
}

/// Response body for `GET /api/chat`.
#[derive(Debug, Serialize)]
pub struct ChatHistoryResponse {
    pub messages: Vec<ChatMessage>,
}

/// Response body for `POST /api/chat`.
#[derive(Debug, Serialize)]
pub struct SaveChatResponse {
    pub success: bool,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/chat?userId=... | ?sessionId=...
///
/// Load the transcript for one owner key. An owner with no stored chat gets
/// an empty message list, not a 404.
pub async fn history(
    State(state): State<AppState>,
    Query(query): Query<ChatQuery>,
) -> AppResult<Json<ChatHistoryResponse>> {
    let owner = OwnerKey::from_parts(query.user_id, query.session_id).map_err(AppError::Core)?;

    let messages = match ChatRepo::find_by_owner(&state.pool, &owner).await? {
        Some(chat) => serde_json::from_value(chat.messages)
            .map_err(|e| AppError::InternalError(format!("Corrupt stored transcript: {e}")))?,
        None => Vec::new(),
    };

    Ok(Json(ChatHistoryResponse { messages }))
}

/// POST /api/chat
///
/// Replace the stored transcript for one owner key with the submitted
/// message list, creating the row on first save.
pub async fn save(
    State(state): State<AppState>,
    Json(input): Json<SaveChatRequest>,
) -> AppResult<Json<SaveChatResponse>> {
    let owner = OwnerKey::from_parts(input.user_id, input.session_id).map_err(AppError::Core)?;

    let messages = serde_json::to_value(&input.messages)
        .map_err(|e| AppError::InternalError(format!("Transcript serialization error: {e}")))?;
    ChatRepo::save(&state.pool, &owner, &messages).await?;

    Ok(Json(SaveChatResponse { success: true }))
}
