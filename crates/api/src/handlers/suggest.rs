//! Handler for the `/ml/suggest` resource.

use axum::extract::State;
use helio_core::error::CoreError;
use helio_ml::{run_suggestion, SuggestRequest};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::extract::Json;
use crate::state::AppState;

/// Request body for `POST /api/ml/suggest`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestApiRequest {
    pub onboarding_data: serde_json::Value,
    #[serde(default)]
    pub message: Option<String>,
}

/// Response body for `POST /api/ml/suggest`.
#[derive(Debug, Serialize)]
pub struct SuggestApiResponse {
    pub suggestion: String,
}

/// POST /api/ml/suggest
///
/// Forward the onboarding payload (plus an optional chat message) to the
/// recommendation process and return its one-line suggestion.
pub async fn suggest(
    State(state): State<AppState>,
    Json(input): Json<SuggestApiRequest>,
) -> AppResult<Json<SuggestApiResponse>> {
    if input.onboarding_data.is_null() {
        return Err(AppError::Core(CoreError::Validation(
            "onboardingData is required".into(),
        )));
    }

    let request = SuggestRequest {
        onboarding: input.onboarding_data,
        message: input.message,
    };
    let suggestion = run_suggestion(&state.config.ml, &request).await?;

    Ok(Json(SuggestApiResponse { suggestion }))
}
