//! Handlers for the `/maintenance` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use hostel_core::error::CoreError;
use hostel_core::lifecycle::check_transition;
use hostel_core::tickets::{MaintenanceStatus, ProblemType};
use hostel_core::types::DbId;
use hostel_db::models::maintenance::{
    CreateMaintenanceRequest, MaintenanceRequest, UpdateMaintenanceRequest,
};
use hostel_db::repositories::MaintenanceRepo;
use validator::Validate;

use super::{student_by_code, student_for_user};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::query::StatusFilter;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Maintenance request",
        id,
    })
}

fn check_status(status: Option<&str>) -> AppResult<()> {
    if let Some(status) = status {
        MaintenanceStatus::from_str(status)?;
    }
    Ok(())
}

/// GET /api/v1/maintenance
pub async fn list(
    _user: AuthUser,
    State(state): State<AppState>,
    Query(filter): Query<StatusFilter>,
) -> AppResult<Json<Vec<MaintenanceRequest>>> {
    check_status(filter.status.as_deref())?;
    Ok(Json(
        MaintenanceRepo::list(&state.pool, filter.status.as_deref()).await?,
    ))
}

/// GET /api/v1/maintenance/student/{code}
pub async fn list_for_student(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(code): Path<String>,
    Query(filter): Query<StatusFilter>,
) -> AppResult<Json<Vec<MaintenanceRequest>>> {
    check_status(filter.status.as_deref())?;
    let student = student_by_code(&state, &code).await?;
    let requests =
        MaintenanceRepo::list_by_student(&state.pool, student.id, filter.status.as_deref())
            .await?;
    Ok(Json(requests))
}

/// GET /api/v1/maintenance/{id}
pub async fn get_by_id(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<MaintenanceRequest>> {
    let request = MaintenanceRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(request))
}

/// POST /api/v1/maintenance
pub async fn create(
    user: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateMaintenanceRequest>,
) -> AppResult<(StatusCode, Json<MaintenanceRequest>)> {
    input.validate()?;
    ProblemType::from_str(&input.problem_type)?;
    let student = student_for_user(&state, user.user_id).await?;
    let request = MaintenanceRepo::create(&state.pool, student.id, &input).await?;
    tracing::info!(
        request_id = request.id,
        room_number = request.room_number,
        "Maintenance request reported"
    );
    Ok((StatusCode::CREATED, Json(request)))
}

/// PUT /api/v1/maintenance/{id}
pub async fn update(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateMaintenanceRequest>,
) -> AppResult<Json<MaintenanceRequest>> {
    let current = MaintenanceRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    let from = MaintenanceStatus::from_str(&current.status)?;

    let mut resolved_by = None;
    if let Some(next) = input.status.as_deref() {
        let to = MaintenanceStatus::from_str(next)?;
        check_transition(from, to)?;
        if to == MaintenanceStatus::Resolved && from != to {
            resolved_by = Some(admin.user_id);
        }
    }

    let request = MaintenanceRepo::update(
        &state.pool,
        id,
        input.status.as_deref(),
        input.resolution_notes.as_deref(),
        resolved_by,
    )
    .await?
    .ok_or_else(|| not_found(id))?;
    Ok(Json(request))
}

/// DELETE /api/v1/maintenance/{id}
pub async fn delete(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if MaintenanceRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}
