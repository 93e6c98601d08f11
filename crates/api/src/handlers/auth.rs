//! Handlers for the `/auth` resource (register, login).

use axum::extract::State;
use helio_core::account::AccountKind;
use helio_core::error::CoreError;
use helio_db::models::user::{CreateUser, UserResponse};
use helio_db::repositories::UserRepo;
use serde::{Deserialize, Serialize};

use crate::auth::jwt::generate_token;
use crate::auth::password::{hash_password, validate_password_strength, verify_password};
use crate::error::{AppError, AppResult};
use crate::extract::Json;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /api/auth/register`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    /// Wire value: "personal" or "organization". Kept as a string so a bad
    /// value produces a 400 with a readable message instead of a body
    /// rejection.
    pub account_kind: String,
    #[serde(default)]
    pub organization_name: Option<String>,
}

/// Request body for `POST /api/auth/login`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    pub account_kind: String,
}

/// Successful authentication response returned by register and login.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserResponse,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/auth/register
///
/// Create an account and return a signed token plus the public user record.
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterRequest>,
) -> AppResult<Json<AuthResponse>> {
    // 1. Normalize and validate input before touching the database.
    let name = input.name.trim();
    if name.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Name is required".into(),
        )));
    }

    let email = input.email.trim().to_lowercase();
    if email.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Email is required".into(),
        )));
    }

    validate_password_strength(&input.password)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let kind = AccountKind::from_str_db(input.account_kind.trim()).map_err(AppError::Core)?;

    let organization_name = match kind {
        AccountKind::Organization => {
            let org = input
                .organization_name
                .as_deref()
                .map(str::trim)
                .unwrap_or("");
            if org.is_empty() {
                return Err(AppError::Core(CoreError::Validation(
                    "Organization name is required for organization accounts".into(),
                )));
            }
            Some(org.to_string())
        }
        AccountKind::Personal => None,
    };

    // 2. Reject duplicate emails with a validation error rather than relying
    //    on the unique constraint, so the message stays stable.
    if UserRepo::find_by_email(&state.pool, &email)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Validation(
            "User already exists with this email".into(),
        )));
    }

    // 3. Hash the password and create the row.
    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let create = CreateUser {
        name: name.to_string(),
        email,
        password_hash,
        account_kind: kind.as_str().to_string(),
        organization_name,
    };
    let user = UserRepo::create(&state.pool, &create).await?;

    tracing::info!(user_id = user.id, kind = kind.as_str(), "user registered");

    // 4. Issue a token so the client is signed in immediately.
    let token = generate_token(user.id, kind.as_str(), &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    Ok(Json(AuthResponse {
        token,
        user: user.into(),
    }))
}

/// POST /api/auth/login
///
/// Authenticate with email + password for a given account kind. All failure
/// modes return the same 401 message so callers cannot probe for accounts.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let email = input.email.trim().to_lowercase();

    let user = UserRepo::find_by_email(&state.pool, &email)
        .await?
        .ok_or_else(invalid_credentials)?;

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        return Err(invalid_credentials());
    }

    // The stored account kind must match the one the client logged in under.
    if user.account_kind != input.account_kind.trim() {
        return Err(invalid_credentials());
    }

    let token = generate_token(user.id, &user.account_kind, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    Ok(Json(AuthResponse {
        token,
        user: user.into(),
    }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn invalid_credentials() -> AppError {
    AppError::Core(CoreError::Unauthorized("Invalid email or password".into()))
}
