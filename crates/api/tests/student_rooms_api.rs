//! HTTP flows that keep room occupancy in step with student writes.

mod common;

use axum::http::StatusCode;
use common::{
    admin_token, body_json, build_test_app, delete_auth, get_auth, post_json, post_json_auth,
    put_json_auth,
};
use hostel_api::auth::password::hash_password;
use hostel_db::models::user::CreateUser;
use hostel_db::repositories::{StudentRepo, UserRepo};
use serde_json::json;
use sqlx::PgPool;

async fn seed_admin(pool: &PgPool) -> String {
    let admin = UserRepo::create(
        pool,
        &CreateUser {
            username: "warden".into(),
            password_hash: hash_password("warden-pass").unwrap(),
            role: "admin".into(),
            student_code: None,
            display_name: None,
            email: None,
        },
    )
    .await
    .unwrap();
    admin_token(admin.id)
}

async fn create_room(pool: &PgPool, token: &str, number: i32) -> i64 {
    let response = post_json_auth(
        build_test_app(pool.clone()),
        "/api/v1/rooms",
        token,
        json!({ "room_number": number, "floor": 1, "capacity": 2 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["id"].as_i64().unwrap()
}

async fn create_student(
    pool: &PgPool,
    token: &str,
    body: serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let app = build_test_app(pool.clone());
    let response = post_json_auth(app, "/api/v1/students", token, body).await;
    let status = response.status();
    (status, body_json(response).await)
}

async fn room_json(pool: &PgPool, token: &str, room_id: i64) -> serde_json::Value {
    let response = get_auth(
        build_test_app(pool.clone()),
        &format!("/api/v1/rooms/{room_id}"),
        token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn room_follows_student_lifecycle(pool: PgPool) {
    let token = seed_admin(&pool).await;
    let room_id = create_room(&pool, &token, 101).await;

    let (status, first) = create_student(
        &pool,
        &token,
        json!({ "student_id": "S1", "name": "Asha", "password": "password123", "room_id": room_id }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, second) = create_student(
        &pool,
        &token,
        json!({ "student_id": "S2", "name": "Ravi", "password": "password123", "room_id": room_id }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let room = room_json(&pool, &token, room_id).await;
    assert_eq!(room["occupants"], 2);
    assert_eq!(room["status"], "occupied");
    assert_eq!(room["students"][0]["student_id"], "S1");
    assert_eq!(room["students"][1]["student_id"], "S2");

    // Explicit null unassigns.
    let first_id = first["id"].as_i64().unwrap();
    let response = put_json_auth(
        build_test_app(pool.clone()),
        &format!("/api/v1/students/{first_id}"),
        &token,
        json!({ "room_id": null }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_json(response).await["room_id"].is_null());

    // Absent room_id leaves the room alone.
    let second_id = second["id"].as_i64().unwrap();
    let response = put_json_auth(
        build_test_app(pool.clone()),
        &format!("/api/v1/students/{second_id}"),
        &token,
        json!({ "name": "Ravi K" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let room = room_json(&pool, &token, room_id).await;
    assert_eq!(room["occupants"], 1);
    assert_eq!(room["student_ids"], json!([second_id]));

    let response = delete_auth(
        build_test_app(pool.clone()),
        &format!("/api/v1/students/{second_id}"),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let room = room_json(&pool, &token, room_id).await;
    assert_eq!(room["occupants"], 0);
    assert_eq!(room["status"], "vacant");
    assert!(UserRepo::find_by_username(&pool, "S2").await.unwrap().is_none());

    let response = get_auth(
        build_test_app(pool.clone()),
        &format!("/api/v1/rooms/{room_id}/drift"),
        &token,
    )
    .await;
    let drift = body_json(response).await;
    assert_eq!(drift["unlisted"], json!([]));
    assert_eq!(drift["stale"], json!([]));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn failed_profile_insert_removes_new_login(pool: PgPool) {
    let token = seed_admin(&pool).await;

    let (status, _) = create_student(
        &pool,
        &token,
        json!({ "student_id": "S3", "name": "Mei", "password": "password123", "email": "mei@example.com" }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = create_student(
        &pool,
        &token,
        json!({ "student_id": "S4", "name": "Mei Two", "password": "password123", "email": "mei@example.com" }),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT, "body: {body}");
    assert!(UserRepo::find_by_username(&pool, "S4").await.unwrap().is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn attendance_upsert_reports_created_then_updated(pool: PgPool) {
    let token = seed_admin(&pool).await;
    let (status, _) = create_student(
        &pool,
        &token,
        json!({ "student_id": "S5", "name": "Lena", "password": "password123" }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let mark = |status: &str| json!({ "student_id": "S5", "date": "2026-03-02", "status": status });

    let response =
        post_json_auth(build_test_app(pool.clone()), "/api/v1/attendance", &token, mark("present"))
            .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response =
        post_json_auth(build_test_app(pool.clone()), "/api/v1/attendance", &token, mark("absent"))
            .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["status"], "absent");

    let response = get_auth(
        build_test_app(pool.clone()),
        "/api/v1/attendance/student/S5/stats",
        &token,
    )
    .await;
    let stats = body_json(response).await;
    assert_eq!(stats["total"], 1);
    assert_eq!(stats["absent"], 1);
    assert_eq!(stats["rate"], 0.0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn failed_room_detach_keeps_student(pool: PgPool) {
    let token = seed_admin(&pool).await;
    let room_id = create_room(&pool, &token, 102).await;
    let (status, student) = create_student(
        &pool,
        &token,
        json!({ "student_id": "S8", "name": "Noor", "password": "password123", "room_id": room_id }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let student_id = student["id"].as_i64().unwrap();

    sqlx::query(
        "CREATE FUNCTION reject_room_writes() RETURNS trigger AS $$ \
         BEGIN RAISE EXCEPTION 'rooms are read-only'; END $$ LANGUAGE plpgsql",
    )
    .execute(&pool)
    .await
    .unwrap();
    sqlx::query(
        "CREATE TRIGGER reject_room_writes BEFORE UPDATE ON rooms \
         FOR EACH ROW EXECUTE FUNCTION reject_room_writes()",
    )
    .execute(&pool)
    .await
    .unwrap();

    let response = delete_auth(
        build_test_app(pool.clone()),
        &format!("/api/v1/students/{student_id}"),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    assert!(StudentRepo::find_by_id(&pool, student_id).await.unwrap().is_some());
    assert!(UserRepo::find_by_username(&pool, "S8").await.unwrap().is_some());
    let room = room_json(&pool, &token, room_id).await;
    assert_eq!(room["student_ids"], json!([student_id]));
    assert_eq!(room["occupants"], 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn login_returns_profile_after_code_change(pool: PgPool) {
    let token = seed_admin(&pool).await;
    let (status, student) = create_student(
        &pool,
        &token,
        json!({ "student_id": "S9", "name": "Ines", "password": "password123" }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let student_id = student["id"].as_i64().unwrap();

    let response = put_json_auth(
        build_test_app(pool.clone()),
        &format!("/api/v1/students/{student_id}"),
        &token,
        json!({ "student_id": "S10" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = post_json(
        build_test_app(pool.clone()),
        "/api/v1/auth/login",
        json!({ "id": "S9", "password": "password123", "role": "student" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["user"]["student_info"]["id"], student_id);
    assert_eq!(json["user"]["student_info"]["student_id"], "S10");
}
