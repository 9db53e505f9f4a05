//! Attendance upsert against Postgres.
//!
//! Needs a live PostgreSQL via `DATABASE_URL`.

use assert_matches::assert_matches;
use chrono::NaiveDate;
use hostel_core::attendance::{mark_attendance, AttendanceBook, AttendanceStatus, Marked, NewMark};
use hostel_core::error::CoreError;
use hostel_db::adapters::PgAttendanceBook;
use hostel_db::models::attendance::AttendanceFilter;
use hostel_db::models::student::CreateStudent;
use hostel_db::models::user::CreateUser;
use hostel_db::repositories::{AttendanceRepo, StudentRepo, UserRepo};
use sqlx::PgPool;

async fn seed_student(pool: &PgPool, code: &str) -> i64 {
    let user = UserRepo::create(
        pool,
        &CreateUser {
            username: code.to_string(),
            password_hash: "not-a-real-hash".to_string(),
            role: "student".to_string(),
            student_code: Some(code.to_string()),
            display_name: None,
            email: None,
        },
    )
    .await
    .unwrap();
    let student = StudentRepo::create(
        pool,
        &CreateStudent {
            student_code: code.to_string(),
            name: "Attendee".to_string(),
            email: None,
            phone: None,
            room_id: None,
            user_id: user.id,
            photo_url: None,
            guardian_name: None,
            address: None,
            year: None,
            branch: None,
        },
    )
    .await
    .unwrap();
    student.id
}

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 9, 14).unwrap()
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn second_mark_for_same_day_overwrites(pool: PgPool) {
    seed_student(&pool, "STU100").await;
    let book = PgAttendanceBook::new(pool.clone());

    let first = mark_attendance(&book, "STU100", day(), AttendanceStatus::Present, None)
        .await
        .unwrap();
    assert!(first.is_created());

    let second = mark_attendance(&book, "STU100", day(), AttendanceStatus::Late, None)
        .await
        .unwrap();
    assert_matches!(&second, Marked::Updated(r) if r.status == "late");

    let filter = AttendanceFilter {
        student_code: Some("STU100".to_string()),
        ..Default::default()
    };
    let rows = AttendanceRepo::list(&pool, &filter).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].status, "late");
    assert_eq!(rows[0].student_code, "STU100");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn duplicate_insert_is_reported_as_conflict(pool: PgPool) {
    let student_id = seed_student(&pool, "STU101").await;
    let book = PgAttendanceBook::new(pool.clone());
    let mark = NewMark {
        student_id,
        date: day(),
        status: AttendanceStatus::Absent,
        marked_by: None,
    };

    book.insert_mark(&mark).await.unwrap();
    assert_matches!(book.insert_mark(&mark).await, Err(CoreError::Conflict(_)));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unknown_student_code_is_not_found(pool: PgPool) {
    let book = PgAttendanceBook::new(pool.clone());
    let result = mark_attendance(&book, "NOPE", day(), AttendanceStatus::Present, None).await;
    assert_matches!(result, Err(CoreError::NotFoundByKey { entity: "Student", .. }));
}
