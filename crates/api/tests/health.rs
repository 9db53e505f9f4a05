//! Health endpoint and general HTTP behaviour.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, get, unreachable_pool};
use sqlx::PgPool;

#[tokio::test]
async fn health_reports_degraded_without_database() {
    let app = build_test_app(unreachable_pool());
    let response = get(app, "/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["db_healthy"], false);
    assert!(json["version"].is_string());
}

#[tokio::test]
async fn response_carries_a_request_id() {
    let app = build_test_app(unreachable_pool());
    let response = get(app, "/health").await;

    let request_id = response
        .headers()
        .get("x-request-id")
        .expect("x-request-id header")
        .to_str()
        .unwrap();
    assert_eq!(request_id.len(), 36);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn health_reports_ok_with_database(pool: PgPool) {
    let app = build_test_app(pool);
    let response = get(app, "/health").await;

    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["db_healthy"], true);
}
