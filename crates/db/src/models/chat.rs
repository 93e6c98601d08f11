//! Chat transcript entity model.

use helio_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `chats` table.
///
/// Exactly one of `owner_user_id` / `owner_session_id` is set, enforced by
/// a CHECK constraint. `messages` is the full transcript as a JSON array of
/// `{sender, text}` objects; the repository replaces it wholesale on save.
#[derive(Debug, Clone, FromRow)]
pub struct Chat {
    pub id: DbId,
    pub owner_user_id: Option<DbId>,
    pub owner_session_id: Option<String>,
    pub messages: serde_json::Value,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
