//! User entity model and DTOs.

use helio_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Full user row from the `users` table.
///
/// Contains the password hash -- NEVER serialize this to API responses
/// directly. Use [`UserResponse`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub account_kind: String,
    pub organization_name: Option<String>,
    pub onboarding_completed: bool,
    pub onboarding_data: Option<serde_json::Value>,
    pub onboarding_completed_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Safe user representation for API responses (no password hash).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub account_kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization_name: Option<String>,
    pub onboarding_completed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub onboarding_data: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub onboarding_completed_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        UserResponse {
            id: user.id,
            name: user.name,
            email: user.email,
            account_kind: user.account_kind,
            organization_name: user.organization_name,
            onboarding_completed: user.onboarding_completed,
            onboarding_data: user.onboarding_data,
            onboarding_completed_at: user.onboarding_completed_at,
            created_at: user.created_at,
        }
    }
}

/// DTO for creating a new user.
#[derive(Debug)]
pub struct CreateUser {
    pub name: String,
    /// Lowercased before insertion by the registration handler.
    pub email: String,
    pub password_hash: String,
    pub account_kind: String,
    pub organization_name: Option<String>,
}
