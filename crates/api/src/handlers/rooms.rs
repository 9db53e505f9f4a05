//! Handlers for the `/rooms` resource.
//!
//! Occupancy (`student_ids`, `occupants`) is never accepted as input; it is
//! written only by the room assignment coordinator.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use hostel_core::error::CoreError;
use hostel_core::room_assignment::{RoomDrift, RoomStatus};
use hostel_core::types::DbId;
use hostel_db::models::room::{CreateRoom, Room, RoomWithStudents, UpdateRoom};
use hostel_db::repositories::{RoomRepo, StudentRepo};
use serde::Serialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

/// Response body for `POST /rooms/{id}/reconcile`.
#[derive(Debug, Serialize)]
pub struct ReconcileResponse {
    /// Drift found before the repair.
    pub drift: RoomDrift,
    pub repaired: bool,
    pub room: RoomWithStudents,
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Room", id })
}

fn check_status(status: Option<&str>) -> AppResult<()> {
    if let Some(status) = status {
        RoomStatus::from_str(status)?;
    }
    Ok(())
}

async fn populate(state: &AppState, room: Room) -> AppResult<RoomWithStudents> {
    let residents = StudentRepo::residents_by_ids(&state.pool, &room.student_ids).await?;
    Ok(RoomWithStudents::assemble(room, &residents))
}

async fn load(state: &AppState, id: DbId) -> AppResult<Room> {
    RoomRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))
}

/// GET /api/v1/rooms
pub async fn list(
    _user: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<RoomWithStudents>>> {
    let rooms = RoomRepo::list(&state.pool).await?;
    let mut ids: Vec<DbId> = rooms.iter().flat_map(|r| r.student_ids.iter().copied()).collect();
    ids.sort_unstable();
    ids.dedup();
    let residents = StudentRepo::residents_by_ids(&state.pool, &ids).await?;

    let populated = rooms
        .into_iter()
        .map(|room| RoomWithStudents::assemble(room, &residents))
        .collect();
    Ok(Json(populated))
}

/// GET /api/v1/rooms/{id}
pub async fn get_by_id(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<RoomWithStudents>> {
    let room = load(&state, id).await?;
    Ok(Json(populate(&state, room).await?))
}

/// GET /api/v1/rooms/number/{room_number}
pub async fn get_by_number(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(room_number): Path<i32>,
) -> AppResult<Json<RoomWithStudents>> {
    let room = RoomRepo::find_by_number(&state.pool, room_number)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFoundByKey {
                entity: "Room",
                key: room_number.to_string(),
            })
        })?;
    Ok(Json(populate(&state, room).await?))
}

/// POST /api/v1/rooms
pub async fn create(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateRoom>,
) -> AppResult<(StatusCode, Json<Room>)> {
    input.validate()?;
    check_status(input.status.as_deref())?;
    let room = RoomRepo::create(&state.pool, &input).await?;
    tracing::info!(room_id = room.id, room_number = room.room_number, "Room created");
    Ok((StatusCode::CREATED, Json(room)))
}

/// PUT /api/v1/rooms/{id}
pub async fn update(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateRoom>,
) -> AppResult<Json<Room>> {
    input.validate()?;
    check_status(input.status.as_deref())?;
    let room = RoomRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(room))
}

/// DELETE /api/v1/rooms/{id}
pub async fn delete(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if RoomRepo::delete(&state.pool, id).await? {
        tracing::info!(room_id = id, "Room deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}

/// GET /api/v1/rooms/{id}/drift
pub async fn drift(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<RoomDrift>> {
    Ok(Json(state.rooms().audit(id).await?))
}

/// POST /api/v1/rooms/{id}/reconcile
pub async fn reconcile(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<ReconcileResponse>> {
    let (drift, _) = state.rooms().reconcile(id).await?;
    let repaired = !drift.is_clean();
    if repaired {
        tracing::info!(room_id = id, reconciled_by = admin.user_id, "Room reconciled on request");
    }
    let room = load(&state, id).await?;
    let room = populate(&state, room).await?;
    Ok(Json(ReconcileResponse {
        drift,
        repaired,
        room,
    }))
}
