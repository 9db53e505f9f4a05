//! Handlers for the `/leaves` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use hostel_core::error::CoreError;
use hostel_core::lifecycle::check_transition;
use hostel_core::tickets::{leave_days, LeaveStatus};
use hostel_core::types::{CalendarDate, DbId};
use hostel_db::models::leave::{CreateLeave, Leave, ReviewLeave};
use hostel_db::models::student::Student;
use hostel_db::repositories::{LeaveRepo, StudentRepo};
use serde::Deserialize;
use validator::Validate;

use super::student_by_code;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::query::StatusFilter;
use crate::state::AppState;

/// Request body for `POST /leaves`.
///
/// `hostel_no` doubles as the external student id when the caller has no
/// linked student profile.
#[derive(Debug, Deserialize, Validate)]
pub struct ApplyLeaveRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(min = 1, max = 50))]
    pub hostel_no: String,
    #[validate(length(min = 1, max = 50))]
    pub leave_type: String,
    #[validate(length(min = 1, max = 200))]
    pub visit_place: String,
    pub start_date: CalendarDate,
    #[validate(length(min = 1, max = 20))]
    pub start_time: String,
    pub end_date: CalendarDate,
    #[validate(length(min = 1, max = 20))]
    pub end_time: String,
    #[validate(length(min = 1))]
    pub reason: String,
    #[validate(length(min = 1, max = 30))]
    pub mobile: String,
    #[validate(range(min = 1))]
    pub days: Option<i32>,
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Leave", id })
}

fn check_status(status: Option<&str>) -> AppResult<()> {
    if let Some(status) = status {
        LeaveStatus::from_str(status)?;
    }
    Ok(())
}

async fn applicant(state: &AppState, user: &AuthUser, hostel_no: &str) -> AppResult<Student> {
    match StudentRepo::find_by_user_id(&state.pool, user.user_id).await? {
        Some(student) => Ok(student),
        None => student_by_code(state, hostel_no).await,
    }
}

/// GET /api/v1/leaves
pub async fn list(
    _user: AuthUser,
    State(state): State<AppState>,
    Query(filter): Query<StatusFilter>,
) -> AppResult<Json<Vec<Leave>>> {
    check_status(filter.status.as_deref())?;
    Ok(Json(LeaveRepo::list(&state.pool, filter.status.as_deref()).await?))
}

/// GET /api/v1/leaves/student/{code}
pub async fn list_for_student(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(code): Path<String>,
    Query(filter): Query<StatusFilter>,
) -> AppResult<Json<Vec<Leave>>> {
    check_status(filter.status.as_deref())?;
    let student = student_by_code(&state, &code).await?;
    let leaves =
        LeaveRepo::list_by_student(&state.pool, student.id, filter.status.as_deref()).await?;
    Ok(Json(leaves))
}

/// GET /api/v1/leaves/{id}
pub async fn get_by_id(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Leave>> {
    let leave = LeaveRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(leave))
}

/// POST /api/v1/leaves
pub async fn apply(
    user: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<ApplyLeaveRequest>,
) -> AppResult<(StatusCode, Json<Leave>)> {
    input.validate()?;
    let computed = leave_days(input.start_date, input.end_date)?;
    let student = applicant(&state, &user, &input.hostel_no).await?;

    let leave = LeaveRepo::create(
        &state.pool,
        &CreateLeave {
            student_id: student.id,
            name: input.name,
            hostel_no: input.hostel_no,
            leave_type: input.leave_type,
            visit_place: input.visit_place,
            start_date: input.start_date,
            start_time: input.start_time,
            end_date: input.end_date,
            end_time: input.end_time,
            reason: input.reason,
            mobile: input.mobile,
            days: input.days.unwrap_or(computed),
        },
    )
    .await?;
    tracing::info!(leave_id = leave.id, student_id = student.id, "Leave applied");
    Ok((StatusCode::CREATED, Json(leave)))
}

/// PUT /api/v1/leaves/{id}
pub async fn review(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<ReviewLeave>,
) -> AppResult<Json<Leave>> {
    let current = LeaveRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    if let Some(next) = input.status.as_deref() {
        check_transition(
            LeaveStatus::from_str(&current.status)?,
            LeaveStatus::from_str(next)?,
        )?;
    }

    let leave = LeaveRepo::review(
        &state.pool,
        id,
        input.status.as_deref(),
        input.review_notes.as_deref(),
        admin.user_id,
    )
    .await?
    .ok_or_else(|| not_found(id))?;
    tracing::info!(leave_id = id, status = %leave.status, reviewed_by = admin.user_id, "Leave reviewed");
    Ok(Json(leave))
}

/// DELETE /api/v1/leaves/{id}
pub async fn delete(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if LeaveRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}
