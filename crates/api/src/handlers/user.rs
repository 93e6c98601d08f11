//! Handlers for the `/user` resource (profile, onboarding submission).

use axum::extract::State;
use helio_core::error::CoreError;
use helio_core::onboarding::{validate_answer_set, AnswerSet};
use helio_core::types::DbId;
use helio_db::models::user::UserResponse;
use helio_db::repositories::UserRepo;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::extract::Json;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /api/user/onboarding`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingSaveRequest {
    /// Must match the authenticated subject.
    pub user_id: DbId,
    /// The full answer mapping, keyed by question id.
    pub onboarding_data: serde_json::Value,
}

/// Response body for `POST /api/user/onboarding`.
#[derive(Debug, Serialize)]
pub struct OnboardingSaveResponse {
    pub success: bool,
    pub user: UserResponse,
}

/// Response body for `GET /api/user/profile`.
#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub user: UserResponse,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/user/profile
///
/// Return the authenticated user's public record.
pub async fn profile(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<ProfileResponse>> {
    let user = UserRepo::find_by_id(&state.pool, auth_user.user_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "User",
                id: auth_user.user_id,
            })
        })?;

    Ok(Json(ProfileResponse { user: user.into() }))
}

/// POST /api/user/onboarding
///
/// Validate the submitted answers against the question catalog and replace
/// the user's stored onboarding payload. Marks onboarding complete and
/// stamps the completion time in the same write.
pub async fn save_onboarding(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(input): Json<OnboardingSaveRequest>,
) -> AppResult<Json<OnboardingSaveResponse>> {
    // 1. The token subject decides whose data may be written.
    if input.user_id != auth_user.user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Cannot modify onboarding data for another user".into(),
        )));
    }

    // 2. Parse the raw payload into the typed answer set, then check every
    //    answer against its question. Unknown keys or malformed shapes fail
    //    here, before any database write.
    let answers: AnswerSet = serde_json::from_value(input.onboarding_data).map_err(|e| {
        AppError::Core(CoreError::Validation(format!(
            "Malformed onboarding payload: {e}"
        )))
    })?;
    validate_answer_set(&answers).map_err(AppError::Core)?;

    let payload = serde_json::to_value(&answers)
        .map_err(|e| AppError::InternalError(format!("Payload serialization error: {e}")))?;

    // 3. Single atomic write: payload, completed flag, completion timestamp.
    let user = UserRepo::save_onboarding(&state.pool, auth_user.user_id, &payload)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "User",
                id: auth_user.user_id,
            })
        })?;

    tracing::info!(user_id = user.id, "onboarding data saved");

    Ok(Json(OnboardingSaveResponse {
        success: true,
        user: user.into(),
    }))
}
