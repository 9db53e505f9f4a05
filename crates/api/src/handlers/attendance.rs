//! Handlers for the `/attendance` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use hostel_core::attendance::{
    mark_attendance, mark_bulk, summarize, AttendanceStats, AttendanceStatus, BulkMarkResult,
};
use hostel_core::error::CoreError;
use hostel_core::types::{CalendarDate, DbId};
use hostel_db::models::attendance::{AttendanceFilter, AttendanceRecord, UpdateAttendance};
use hostel_db::repositories::AttendanceRepo;
use serde::Deserialize;

use super::student_by_code;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::{AttendanceQuery, DateRange};
use crate::state::AppState;

/// Request body for `POST /attendance`.
#[derive(Debug, Deserialize)]
pub struct MarkRequest {
    pub student_id: String,
    pub date: CalendarDate,
    pub status: String,
}

/// Request body for `POST /attendance/bulk`.
#[derive(Debug, Deserialize)]
pub struct BulkMarkRequest {
    #[serde(default)]
    pub student_ids: Vec<String>,
    pub date: CalendarDate,
    pub status: String,
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Attendance record",
        id,
    })
}

fn check_status(status: Option<&str>) -> AppResult<()> {
    if let Some(status) = status {
        AttendanceStatus::from_str(status)?;
    }
    Ok(())
}

/// GET /api/v1/attendance
pub async fn list(
    _user: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<AttendanceQuery>,
) -> AppResult<Json<Vec<AttendanceRecord>>> {
    check_status(params.status.as_deref())?;
    let filter = AttendanceFilter {
        student_code: params.student_id,
        status: params.status,
        start_date: params.start_date,
        end_date: params.end_date,
    };
    Ok(Json(AttendanceRepo::list(&state.pool, &filter).await?))
}

/// GET /api/v1/attendance/student/{code}
pub async fn list_for_student(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(code): Path<String>,
    Query(range): Query<DateRange>,
) -> AppResult<Json<Vec<AttendanceRecord>>> {
    let student = student_by_code(&state, &code).await?;
    let filter = AttendanceFilter {
        student_code: Some(student.student_code),
        start_date: range.start_date,
        end_date: range.end_date,
        ..Default::default()
    };
    Ok(Json(AttendanceRepo::list(&state.pool, &filter).await?))
}

/// GET /api/v1/attendance/student/{code}/stats
pub async fn stats_for_student(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(code): Path<String>,
    Query(range): Query<DateRange>,
) -> AppResult<Json<AttendanceStats>> {
    let student = student_by_code(&state, &code).await?;
    let stored =
        AttendanceRepo::statuses_for(&state.pool, student.id, range.start_date, range.end_date)
            .await?;
    let statuses = stored
        .iter()
        .map(|s| AttendanceStatus::from_str(s))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Json(summarize(statuses)))
}

/// POST /api/v1/attendance
///
/// Marks one student for one day: 201 when a record was created, 200 when
/// the existing record for that day was overwritten.
pub async fn mark(
    user: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<MarkRequest>,
) -> AppResult<(StatusCode, Json<AttendanceRecord>)> {
    let status = AttendanceStatus::from_str(&input.status)?;
    let book = state.attendance_book();
    let marked =
        mark_attendance(&book, &input.student_id, input.date, status, Some(user.user_id)).await?;

    let code = if marked.is_created() {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((code, Json(marked.into_record())))
}

/// POST /api/v1/attendance/bulk
pub async fn mark_many(
    user: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<BulkMarkRequest>,
) -> AppResult<(StatusCode, Json<Vec<BulkMarkResult<AttendanceRecord>>>)> {
    let status = AttendanceStatus::from_str(&input.status)?;
    let book = state.attendance_book();
    let results = mark_bulk(
        &book,
        &input.student_ids,
        input.date,
        status,
        Some(user.user_id),
    )
    .await?;
    tracing::info!(
        count = results.len(),
        date = %input.date,
        marked_by = user.user_id,
        "Bulk attendance marked"
    );
    Ok((StatusCode::CREATED, Json(results)))
}

/// PUT /api/v1/attendance/{id}
pub async fn update(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateAttendance>,
) -> AppResult<Json<AttendanceRecord>> {
    check_status(input.status.as_deref())?;
    let record = AttendanceRepo::update(&state.pool, id, &input, Some(user.user_id))
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(record))
}

/// DELETE /api/v1/attendance/{id}
pub async fn delete(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if AttendanceRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}
