//! Repository for the `chats` table.

use helio_core::chat::OwnerKey;
use sqlx::PgPool;

use crate::models::chat::Chat;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, owner_user_id, owner_session_id, messages, created_at, updated_at";

/// Provides transcript lookup and full-list upsert for chats.
pub struct ChatRepo;

impl ChatRepo {
    /// Find the transcript for an owner key, if any.
    pub async fn find_by_owner(
        pool: &PgPool,
        owner: &OwnerKey,
    ) -> Result<Option<Chat>, sqlx::Error> {
        match owner {
            OwnerKey::User(user_id) => {
                let query = format!("SELECT {COLUMNS} FROM chats WHERE owner_user_id = $1");
                sqlx::query_as::<_, Chat>(&query)
                    .bind(user_id)
                    .fetch_optional(pool)
                    .await
            }
            OwnerKey::Session(session_id) => {
                let query = format!("SELECT {COLUMNS} FROM chats WHERE owner_session_id = $1");
                sqlx::query_as::<_, Chat>(&query)
                    .bind(session_id)
                    .fetch_optional(pool)
                    .await
            }
        }
    }

    /// Replace the stored transcript for an owner key, creating the row if
    /// absent. The caller always sends the complete message list; the store
    /// is replace-not-append, last-writer-wins.
    pub async fn save(
        pool: &PgPool,
        owner: &OwnerKey,
        messages: &serde_json::Value,
    ) -> Result<Chat, sqlx::Error> {
        match owner {
            OwnerKey::User(user_id) => {
                let query = format!(
                    "INSERT INTO chats (owner_user_id, messages)
                     VALUES ($1, $2)
                     ON CONFLICT (owner_user_id)
                     DO UPDATE SET messages = $2, updated_at = now()
                     RETURNING {COLUMNS}"
                );
                sqlx::query_as::<_, Chat>(&query)
                    .bind(user_id)
                    .bind(messages)
                    .fetch_one(pool)
                    .await
            }
            OwnerKey::Session(session_id) => {
                let query = format!(
                    "INSERT INTO chats (owner_session_id, messages)
                     VALUES ($1, $2)
                     ON CONFLICT (owner_session_id)
                     DO UPDATE SET messages = $2, updated_at = now()
                     RETURNING {COLUMNS}"
                );
                sqlx::query_as::<_, Chat>(&query)
                    .bind(session_id)
                    .bind(messages)
                    .fetch_one(pool)
                    .await
            }
        }
    }
}
