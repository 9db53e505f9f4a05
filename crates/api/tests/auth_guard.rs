//! Authentication and role checks that reject before any database access.

mod common;

use axum::http::{Method, StatusCode};
use common::{
    admin_token, body_json, build_test_app, get, get_auth, post_json, post_json_auth, send,
    student_token, unreachable_pool,
};
use serde_json::json;

#[tokio::test]
async fn missing_token_is_rejected_with_401() {
    let app = build_test_app(unreachable_pool());
    let response = get(app, "/api/v1/students").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn malformed_authorization_header_is_rejected() {
    let app = build_test_app(unreachable_pool());
    let request = axum::http::Request::builder()
        .uri("/api/v1/rooms")
        .header("authorization", "Token abc")
        .body(axum::body::Body::empty())
        .unwrap();
    let response = tower::ServiceExt::oneshot(app, request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn garbage_token_is_rejected() {
    let app = build_test_app(unreachable_pool());
    let response = get_auth(app, "/api/v1/attendance", "not-a-jwt").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Invalid or expired token");
}

#[tokio::test]
async fn student_cannot_create_rooms() {
    let app = build_test_app(unreachable_pool());
    let token = student_token(7, "STU001");
    let response = post_json_auth(
        app,
        "/api/v1/rooms",
        &token,
        json!({ "room_number": 101, "floor": 1 }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Admin role required");
}

#[tokio::test]
async fn student_cannot_delete_students_or_reconcile_rooms() {
    let token = student_token(7, "STU001");

    let app = build_test_app(unreachable_pool());
    let response = send(app, Method::DELETE, "/api/v1/students/3", Some(&token), None).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let app = build_test_app(unreachable_pool());
    let response = send(app, Method::POST, "/api/v1/rooms/3/reconcile", Some(&token), None).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn student_cannot_register_users() {
    let app = build_test_app(unreachable_pool());
    let token = student_token(7, "STU001");
    let response = post_json_auth(
        app,
        "/api/v1/auth/register",
        &token,
        json!({ "username": "eve", "password": "password123", "role": "admin" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn login_requires_every_field() {
    let app = build_test_app(unreachable_pool());
    let response = post_json(
        app,
        "/api/v1/auth/login",
        json!({ "id": "admin", "password": "admin123" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "All fields are required");
}

#[tokio::test]
async fn login_with_unknown_role_is_rejected_as_bad_credentials() {
    let app = build_test_app(unreachable_pool());
    let response = post_json(
        app,
        "/api/v1/auth/login",
        json!({ "id": "admin", "password": "admin123", "role": "warden" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Incorrect warden ID or Password");
}

#[tokio::test]
async fn admin_register_with_short_password_is_rejected() {
    let app = build_test_app(unreachable_pool());
    let token = admin_token(1);
    let response = post_json_auth(
        app,
        "/api/v1/auth/register",
        &token,
        json!({ "username": "warden", "password": "short", "role": "admin" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unknown_route_returns_404() {
    let app = build_test_app(unreachable_pool());
    let response = get(app, "/this-route-does-not-exist").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
