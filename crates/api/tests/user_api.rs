//! HTTP-level integration tests for auth enforcement and onboarding
//! submission validation on the `/user` routes.
//!
//! Everything here fails before the first database query: token extraction,
//! subject checks, and answer-set validation all run ahead of the repository
//! calls, so a live Postgres is not required.

mod common;

use axum::http::StatusCode;
use common::{auth_token_for, body_json, build_test_app, get, get_auth, lazy_pool, post_json_auth};
use serde_json::json;

/// A complete, valid answer payload for all six questions.
fn valid_answers() -> serde_json::Value {
    json!({
        "location": { "country": "Germany", "city": "Freiburg", "zipCode": "79098" },
        "energyType": ["solar", "wind"],
        "propertyType": "house",
        "currentUsage": 450,
        "timeframe": "short",
        "goals": ["cost_savings", "environmental"],
    })
}

// ---------------------------------------------------------------------------
// Token enforcement
// ---------------------------------------------------------------------------

#[tokio::test]
async fn profile_without_token_returns_401() {
    let app = build_test_app(lazy_pool());
    let response = get(app, "/api/user/profile").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn profile_with_garbage_token_returns_401() {
    let app = build_test_app(lazy_pool());
    let response = get_auth(app, "/api/user/profile", "not-a-jwt").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn profile_with_wrong_auth_scheme_returns_401() {
    let app = build_test_app(lazy_pool());
    let request = axum::http::Request::builder()
        .method(axum::http::Method::GET)
        .uri("/api/user/profile")
        .header("authorization", "Basic dXNlcjpwYXNz")
        .body(axum::body::Body::empty())
        .unwrap();
    let response = tower::ServiceExt::oneshot(app, request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// Onboarding submission
// ---------------------------------------------------------------------------

#[tokio::test]
async fn onboarding_for_another_user_returns_403() {
    let app = build_test_app(lazy_pool());
    let token = auth_token_for(1, "personal");

    let body = json!({ "userId": 2, "onboardingData": valid_answers() });
    let response = post_json_auth(app, "/api/user/onboarding", body, &token).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let json = body_json(response).await;
    assert_eq!(json["code"], "FORBIDDEN");
}

#[tokio::test]
async fn onboarding_without_token_returns_401() {
    let app = build_test_app(lazy_pool());
    let body = json!({ "userId": 1, "onboardingData": valid_answers() });

    let response = common::post_json(app, "/api/user/onboarding", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn onboarding_rejects_unknown_question_id() {
    let app = build_test_app(lazy_pool());
    let token = auth_token_for(1, "personal");

    let mut answers = valid_answers();
    answers["favoriteColor"] = json!("green");
    let body = json!({ "userId": 1, "onboardingData": answers });

    let response = post_json_auth(app, "/api/user/onboarding", body, &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn onboarding_rejects_out_of_catalog_option() {
    let app = build_test_app(lazy_pool());
    let token = auth_token_for(1, "personal");

    let mut answers = valid_answers();
    answers["energyType"] = json!(["solar", "geothermal"]);
    let body = json!({ "userId": 1, "onboardingData": answers });

    let response = post_json_auth(app, "/api/user/onboarding", body, &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn onboarding_rejects_out_of_range_usage() {
    let app = build_test_app(lazy_pool());
    let token = auth_token_for(1, "personal");

    let mut answers = valid_answers();
    answers["currentUsage"] = json!(5000);
    let body = json!({ "userId": 1, "onboardingData": answers });

    let response = post_json_auth(app, "/api/user/onboarding", body, &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn onboarding_rejects_missing_question() {
    let app = build_test_app(lazy_pool());
    let token = auth_token_for(1, "personal");

    let mut answers = valid_answers();
    answers.as_object_mut().unwrap().remove("goals");
    let body = json!({ "userId": 1, "onboardingData": answers });

    let response = post_json_auth(app, "/api/user/onboarding", body, &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn onboarding_rejects_wrong_answer_shape() {
    let app = build_test_app(lazy_pool());
    let token = auth_token_for(1, "personal");

    // Location answered with a bare string instead of an object.
    let mut answers = valid_answers();
    answers["location"] = json!("Freiburg");
    let body = json!({ "userId": 1, "onboardingData": answers });

    let response = post_json_auth(app, "/api/user/onboarding", body, &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
