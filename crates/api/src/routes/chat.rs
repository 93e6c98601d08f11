//! Route definitions for the `/chat` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::chat;
use crate::state::AppState;

/// Routes mounted at `/chat`.
///
/// ```text
/// GET  / -> history (?userId= | ?sessionId=)
/// POST / -> save
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(chat::history).post(chat::save))
}
