//! Integration tests for the chat repository against a real database.
//!
//! Exercises the replace-not-append upsert, per-owner-key isolation, and
//! the exactly-one-owner schema constraint.

use helio_core::chat::{ChatMessage, OwnerKey, Sender};
use helio_db::models::user::CreateUser;
use helio_db::repositories::{ChatRepo, UserRepo};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn create_user(pool: &PgPool, email: &str) -> i64 {
    let input = CreateUser {
        name: "Chat Owner".to_string(),
        email: email.to_string(),
        password_hash: "$argon2id$stub".to_string(),
        account_kind: "personal".to_string(),
        organization_name: None,
    };
    UserRepo::create(pool, &input)
        .await
        .expect("user creation should succeed")
        .id
}

fn transcript(texts: &[&str]) -> serde_json::Value {
    let messages: Vec<ChatMessage> = texts
        .iter()
        .enumerate()
        .map(|(i, text)| ChatMessage {
            sender: if i % 2 == 0 {
                Sender::User
            } else {
                Sender::Assistant
            },
            text: (*text).to_string(),
        })
        .collect();
    serde_json::to_value(messages).expect("transcript should serialize")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

/// Save then load under the same user key returns the identical transcript.
#[sqlx::test(migrations = "./migrations")]
async fn save_then_find_round_trip_for_user_key(pool: PgPool) {
    let user_id = create_user(&pool, "owner@example.test").await;
    let owner = OwnerKey::User(user_id);
    let messages = transcript(&["hello", "hi, how can I help?"]);

    ChatRepo::save(&pool, &owner, &messages)
        .await
        .expect("save should succeed");

    let chat = ChatRepo::find_by_owner(&pool, &owner)
        .await
        .expect("find should succeed")
        .expect("transcript should exist");
    assert_eq!(chat.owner_user_id, Some(user_id));
    assert_eq!(chat.owner_session_id, None);
    assert_eq!(chat.messages, messages);
}

/// Anonymous transcripts round-trip under their session key.
#[sqlx::test(migrations = "./migrations")]
async fn save_then_find_round_trip_for_session_key(pool: PgPool) {
    let owner = OwnerKey::Session("anon-1234".to_string());
    let messages = transcript(&["what about tidal?"]);

    ChatRepo::save(&pool, &owner, &messages)
        .await
        .expect("save should succeed");

    let chat = ChatRepo::find_by_owner(&pool, &owner)
        .await
        .expect("find should succeed")
        .expect("transcript should exist");
    assert_eq!(chat.owner_session_id.as_deref(), Some("anon-1234"));
    assert_eq!(chat.messages, messages);
}

/// A second save replaces the stored list; nothing is appended.
#[sqlx::test(migrations = "./migrations")]
async fn second_save_replaces_the_transcript(pool: PgPool) {
    let owner = OwnerKey::Session("anon-replace".to_string());

    ChatRepo::save(&pool, &owner, &transcript(&["one", "two", "three"]))
        .await
        .expect("first save should succeed");

    let shorter = transcript(&["fresh start"]);
    ChatRepo::save(&pool, &owner, &shorter)
        .await
        .expect("second save should succeed");

    let chat = ChatRepo::find_by_owner(&pool, &owner)
        .await
        .expect("find should succeed")
        .expect("transcript should exist");
    assert_eq!(chat.messages, shorter);

    // Still exactly one row for this owner.
    let count: (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM chats WHERE owner_session_id = 'anon-replace'")
            .fetch_one(&pool)
            .await
            .expect("count should succeed");
    assert_eq!(count.0, 1);
}

/// A transcript saved under one key is invisible to an unrelated key.
#[sqlx::test(migrations = "./migrations")]
async fn unrelated_owner_key_sees_no_transcript(pool: PgPool) {
    let user_id = create_user(&pool, "isolated@example.test").await;
    ChatRepo::save(&pool, &OwnerKey::User(user_id), &transcript(&["mine"]))
        .await
        .expect("save should succeed");

    let other = ChatRepo::find_by_owner(&pool, &OwnerKey::Session("someone-else".to_string()))
        .await
        .expect("find should succeed");
    assert!(other.is_none());
}

/// The schema rejects a row claiming both owner keys.
#[sqlx::test(migrations = "./migrations")]
async fn row_with_both_owner_keys_violates_check_constraint(pool: PgPool) {
    let user_id = create_user(&pool, "both@example.test").await;

    let err = sqlx::query(
        "INSERT INTO chats (owner_user_id, owner_session_id, messages)
         VALUES ($1, $2, '[]'::jsonb)",
    )
    .bind(user_id)
    .bind("anon-both")
    .execute(&pool)
    .await
    .expect_err("insert must fail");

    match err {
        sqlx::Error::Database(db_err) => {
            assert_eq!(db_err.constraint(), Some("ck_chats_exactly_one_owner"));
        }
        other => panic!("expected a database error, got {other:?}"),
    }
}
