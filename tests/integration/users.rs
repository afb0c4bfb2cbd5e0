use crate::common;

use axum::http::StatusCode;
use tower::ServiceExt;

#[tokio::test]
async fn test_current_user() {
    let (state, _) = common::memory_app_state();
    let app = common::test_app(state);
    let (access, _) = common::login(&app, "alice@example.com", "google-1").await;

    let response = app
        .oneshot(common::bearer_request("GET", "/api/v1/users/me", &access))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = common::body_json(response).await;
    assert_eq!(json["email"], "alice@example.com");
    assert_eq!(json["userName"], "alice");
    assert_eq!(json["role"], "standard");
}

#[tokio::test]
async fn test_get_user_by_id_and_email() {
    let (state, _) = common::memory_app_state();
    let app = common::test_app(state);
    let (access, _) = common::login(&app, "alice@example.com", "google-1").await;

    let response = app
        .clone()
        .oneshot(common::bearer_request(
            "GET",
            "/api/v1/users/email/alice@example.com",
            &access,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = common::body_json(response).await;
    let id = json["id"].as_i64().unwrap();

    let response = app
        .oneshot(common::bearer_request("GET", &format!("/api/v1/users/{}", id), &access))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = common::body_json(response).await;
    assert_eq!(json["email"], "alice@example.com");
}

#[tokio::test]
async fn test_unknown_user_is_not_found() {
    let (state, _) = common::memory_app_state();
    let app = common::test_app(state);
    let (access, _) = common::login(&app, "alice@example.com", "google-1").await;

    let response = app
        .oneshot(common::bearer_request("GET", "/api/v1/users/999", &access))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = common::body_json(response).await;
    assert_eq!(json["status"], 404);
    assert_eq!(json["description"], "user not found");
}

#[tokio::test]
async fn test_non_numeric_id_is_bad_request() {
    let (state, _) = common::memory_app_state();
    let app = common::test_app(state);
    let (access, _) = common::login(&app, "alice@example.com", "google-1").await;

    let response = app
        .oneshot(common::bearer_request("GET", "/api/v1/users/abc", &access))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = common::body_json(response).await;
    assert_eq!(json["status"], 400);
}

#[tokio::test]
async fn test_standard_user_cannot_post_to_users() {
    let (state, _) = common::memory_app_state();
    let app = common::test_app(state);
    let (access, _) = common::login(&app, "alice@example.com", "google-1").await;

    let response = app
        .oneshot(common::bearer_request("POST", "/api/v1/users/1", &access))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
