//! Handlers for the `/complaints` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use hostel_core::error::CoreError;
use hostel_core::lifecycle::check_transition;
use hostel_core::tickets::{ComplaintCategory, ComplaintStatus};
use hostel_core::types::DbId;
use hostel_db::models::complaint::{Complaint, CreateComplaint, UpdateComplaint};
use hostel_db::repositories::ComplaintRepo;
use validator::Validate;

use super::{student_by_code, student_for_user};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::query::StatusFilter;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Complaint",
        id,
    })
}

fn check_status(status: Option<&str>) -> AppResult<()> {
    if let Some(status) = status {
        ComplaintStatus::from_str(status)?;
    }
    Ok(())
}

/// GET /api/v1/complaints
pub async fn list(
    _user: AuthUser,
    State(state): State<AppState>,
    Query(filter): Query<StatusFilter>,
) -> AppResult<Json<Vec<Complaint>>> {
    check_status(filter.status.as_deref())?;
    Ok(Json(ComplaintRepo::list(&state.pool, filter.status.as_deref()).await?))
}

/// GET /api/v1/complaints/student/{code}
pub async fn list_for_student(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(code): Path<String>,
    Query(filter): Query<StatusFilter>,
) -> AppResult<Json<Vec<Complaint>>> {
    check_status(filter.status.as_deref())?;
    let student = student_by_code(&state, &code).await?;
    let complaints =
        ComplaintRepo::list_by_student(&state.pool, student.id, filter.status.as_deref()).await?;
    Ok(Json(complaints))
}

/// GET /api/v1/complaints/{id}
pub async fn get_by_id(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Complaint>> {
    let complaint = ComplaintRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(complaint))
}

/// POST /api/v1/complaints
///
/// Filed against the caller's own student profile.
pub async fn create(
    user: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateComplaint>,
) -> AppResult<(StatusCode, Json<Complaint>)> {
    input.validate()?;
    ComplaintCategory::from_str(&input.category)?;
    let student = student_for_user(&state, user.user_id).await?;
    let complaint = ComplaintRepo::create(&state.pool, student.id, &input).await?;
    tracing::info!(complaint_id = complaint.id, student_id = student.id, "Complaint filed");
    Ok((StatusCode::CREATED, Json(complaint)))
}

/// PUT /api/v1/complaints/{id}
///
/// Moving to `resolved` stamps the resolver and time.
pub async fn update(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateComplaint>,
) -> AppResult<Json<Complaint>> {
    let current = ComplaintRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    let from = ComplaintStatus::from_str(&current.status)?;

    let mut resolved_by = None;
    if let Some(next) = input.status.as_deref() {
        let to = ComplaintStatus::from_str(next)?;
        check_transition(from, to)?;
        if to == ComplaintStatus::Resolved && from != to {
            resolved_by = Some(admin.user_id);
        }
    }

    let complaint = ComplaintRepo::update(
        &state.pool,
        id,
        input.status.as_deref(),
        input.resolution_message.as_deref(),
        resolved_by,
    )
    .await?
    .ok_or_else(|| not_found(id))?;
    Ok(Json(complaint))
}

/// DELETE /api/v1/complaints/{id}
pub async fn delete(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if ComplaintRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}
