//! Route definitions for the `/ml` resource.

use axum::routing::post;
use axum::Router;

use crate::handlers::suggest;
use crate::state::AppState;

/// Routes mounted at `/ml`.
///
/// ```text
/// POST /suggest -> suggest (public; sessions exist before accounts do)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/suggest", post(suggest::suggest))
}
