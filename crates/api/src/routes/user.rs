//! Route definitions for the `/user` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::user;
use crate::state::AppState;

/// Routes mounted at `/user`.
///
/// ```text
/// GET  /profile    -> profile (requires auth)
/// POST /onboarding -> save_onboarding (requires auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/profile", get(user::profile))
        .route("/onboarding", post(user::save_onboarding))
}
