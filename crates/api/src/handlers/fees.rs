//! Handlers for the `/fees` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use hostel_core::error::CoreError;
use hostel_core::lifecycle::check_transition;
use hostel_core::tickets::FeeStatus;
use hostel_core::types::{CalendarDate, DbId};
use hostel_db::models::fee::{CreateFee, Fee, UpdateFee};
use hostel_db::repositories::FeeRepo;
use serde::Deserialize;
use validator::Validate;

use super::student_by_code;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::query::StatusFilter;
use crate::state::AppState;

/// Request body for `POST /fees`. `student_id` is the external student id.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateFeeRequest {
    #[validate(length(min = 1))]
    pub student_id: String,
    #[validate(range(min = 0.0))]
    pub amount: f64,
    pub due_date: CalendarDate,
    pub status: Option<String>,
    pub paid_date: Option<CalendarDate>,
    pub payment_method: Option<String>,
    pub transaction_id: Option<String>,
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Fee", id })
}

fn check_status(status: Option<&str>) -> AppResult<()> {
    if let Some(status) = status {
        FeeStatus::from_str(status)?;
    }
    Ok(())
}

fn today() -> CalendarDate {
    chrono::Utc::now().date_naive()
}

/// GET /api/v1/fees
pub async fn list(
    _user: AuthUser,
    State(state): State<AppState>,
    Query(filter): Query<StatusFilter>,
) -> AppResult<Json<Vec<Fee>>> {
    check_status(filter.status.as_deref())?;
    Ok(Json(FeeRepo::list(&state.pool, filter.status.as_deref()).await?))
}

/// GET /api/v1/fees/student/{code}
pub async fn list_for_student(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(code): Path<String>,
    Query(filter): Query<StatusFilter>,
) -> AppResult<Json<Vec<Fee>>> {
    check_status(filter.status.as_deref())?;
    let student = student_by_code(&state, &code).await?;
    let fees = FeeRepo::list_by_student(&state.pool, student.id, filter.status.as_deref()).await?;
    Ok(Json(fees))
}

/// GET /api/v1/fees/{id}
pub async fn get_by_id(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Fee>> {
    let fee = FeeRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(fee))
}

/// POST /api/v1/fees
pub async fn create(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateFeeRequest>,
) -> AppResult<(StatusCode, Json<Fee>)> {
    input.validate()?;
    let status = match input.status.as_deref() {
        Some(s) => FeeStatus::from_str(s)?,
        None => FeeStatus::Pending,
    };
    let student = student_by_code(&state, &input.student_id).await?;

    let paid_date = match (status, input.paid_date) {
        (FeeStatus::Paid, None) => Some(today()),
        (_, paid_date) => paid_date,
    };
    let fee = FeeRepo::create(
        &state.pool,
        &CreateFee {
            student_id: student.id,
            amount: input.amount,
            due_date: input.due_date,
            status: status.as_str().to_string(),
            paid_date,
            payment_method: input.payment_method,
            transaction_id: input.transaction_id,
        },
    )
    .await?;
    tracing::info!(fee_id = fee.id, student_id = student.id, amount = fee.amount, "Fee created");
    Ok((StatusCode::CREATED, Json(fee)))
}

/// PUT /api/v1/fees/{id}
///
/// Moving to `paid` without a `paid_date` stamps today.
pub async fn update(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(mut input): Json<UpdateFee>,
) -> AppResult<Json<Fee>> {
    input.validate()?;
    let current = FeeRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;

    if let Some(next) = input.status.as_deref() {
        let from = FeeStatus::from_str(&current.status)?;
        let to = FeeStatus::from_str(next)?;
        check_transition(from, to)?;
        if to == FeeStatus::Paid && input.paid_date.is_none() && current.paid_date.is_none() {
            input.paid_date = Some(today());
        }
    }

    let fee = FeeRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(fee))
}

/// DELETE /api/v1/fees/{id}
pub async fn delete(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if FeeRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}
