//! Handlers for the `/mess-menu` resource. Entries are keyed by weekday.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use hostel_core::error::CoreError;
use hostel_core::mess_menu::Weekday;
use hostel_db::models::mess_menu::{MessMenu, UpdateMessMenu, UpsertMessMenu};
use hostel_db::repositories::MessMenuRepo;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

fn not_found(day: Weekday) -> AppError {
    AppError::Core(CoreError::NotFoundByKey {
        entity: "Mess menu for",
        key: day.as_str().to_string(),
    })
}

/// GET /api/v1/mess-menu
pub async fn list(_user: AuthUser, State(state): State<AppState>) -> AppResult<Json<Vec<MessMenu>>> {
    let mut menus = MessMenuRepo::list(&state.pool).await?;
    menus.sort_by_key(|m| {
        Weekday::parse_loose(&m.day)
            .map(|d| d.ordinal())
            .unwrap_or(usize::MAX)
    });
    Ok(Json(menus))
}

/// GET /api/v1/mess-menu/{day}
pub async fn get_by_day(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(day): Path<String>,
) -> AppResult<Json<MessMenu>> {
    let day = Weekday::parse_loose(&day)?;
    let menu = MessMenuRepo::find_by_day(&state.pool, day.as_str())
        .await?
        .ok_or_else(|| not_found(day))?;
    Ok(Json(menu))
}

/// POST /api/v1/mess-menu
///
/// Creates or replaces the menu for the given day.
pub async fn upsert(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<UpsertMessMenu>,
) -> AppResult<(StatusCode, Json<MessMenu>)> {
    input.validate()?;
    let day = Weekday::parse_loose(&input.day)?;
    let menu = MessMenuRepo::upsert(&state.pool, day.as_str(), &input).await?;
    Ok((StatusCode::CREATED, Json(menu)))
}

/// PUT /api/v1/mess-menu/{day}
pub async fn update(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(day): Path<String>,
    Json(input): Json<UpdateMessMenu>,
) -> AppResult<Json<MessMenu>> {
    input.validate()?;
    let day = Weekday::parse_loose(&day)?;
    let menu = MessMenuRepo::update(&state.pool, day.as_str(), &input)
        .await?
        .ok_or_else(|| not_found(day))?;
    Ok(Json(menu))
}

/// DELETE /api/v1/mess-menu/{day}
pub async fn delete(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(day): Path<String>,
) -> AppResult<StatusCode> {
    let day = Weekday::parse_loose(&day)?;
    if MessMenuRepo::delete(&state.pool, day.as_str()).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(day))
    }
}
