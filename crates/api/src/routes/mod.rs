pub mod auth;
pub mod chat;
pub mod health;
pub mod ml;
pub mod user;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register      register (public)
/// /auth/login         login (public)
///
/// /user/profile       own profile (requires auth)
/// /user/onboarding    save onboarding answers (requires auth)
///
/// /ml/suggest         energy model suggestion (public)
///
/// /chat               load transcript (GET), save transcript (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Account creation and sign-in.
        .nest("/auth", auth::router())
        // Authenticated user resources.
        .nest("/user", user::router())
        // Recommendation bridge.
        .nest("/ml", ml::router())
        // Chat transcript store, keyed by user or anonymous session.
        .nest("/chat", chat::router())
}
