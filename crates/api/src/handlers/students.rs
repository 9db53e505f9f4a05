//! Handlers for the `/students` resource.
//!
//! Every write that can change a student's `room_id` is followed by the
//! matching room assignment coordinator step. The student write is never
//! undone when the room side fails; the failure is logged as drift and the
//! response still reports the student write.

use std::fmt::Debug;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use hostel_core::error::CoreError;
use hostel_core::roles::ROLE_STUDENT;
use hostel_core::student::AcademicYear;
use hostel_core::types::DbId;
use hostel_db::models::student::{
    CreateStudent, Student, StudentWithRoom, UpdateOwnProfile, UpdateStudent,
};
use hostel_db::models::user::CreateUser;
use hostel_db::repositories::{RoomRepo, StudentRepo, UserRepo};
use serde::Deserialize;
use validator::Validate;

use super::{student_by_code, student_for_user};
use crate::auth::password::{hash_password, validate_password_strength, MIN_PASSWORD_LENGTH};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

/// Request body for `POST /students`: the profile plus the initial password
/// of the paired login.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateStudentRequest {
    #[validate(length(min = 1, max = 50))]
    pub student_id: String,
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    pub password: String,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(max = 30))]
    pub phone: Option<String>,
    pub room_id: Option<DbId>,
    pub photo_url: Option<String>,
    pub guardian_name: Option<String>,
    pub address: Option<String>,
    pub year: Option<String>,
    pub branch: Option<String>,
}

fn check_year(year: Option<&str>) -> AppResult<()> {
    if let Some(year) = year {
        AcademicYear::from_str(year)?;
    }
    Ok(())
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Student",
        id,
    })
}

/// Log a failed room-side step. The student write already happened.
fn report_room_step<T: Debug>(step: &str, student_id: DbId, result: Result<T, CoreError>) {
    match result {
        Ok(outcome) => tracing::debug!(student_id, step, ?outcome, "Room assignment step done"),
        Err(e) => tracing::error!(
            student_id,
            step,
            error = %e,
            "Room update failed after student write; room occupancy has drifted"
        ),
    }
}

/// GET /api/v1/students
pub async fn list(
    _user: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<StudentWithRoom>>> {
    Ok(Json(StudentRepo::list(&state.pool).await?))
}

/// GET /api/v1/students/me
pub async fn me(user: AuthUser, State(state): State<AppState>) -> AppResult<Json<StudentWithRoom>> {
    let student = student_for_user(&state, user.user_id).await?;
    let with_room = StudentRepo::find_with_room(&state.pool, student.id)
        .await?
        .ok_or_else(|| not_found(student.id))?;
    Ok(Json(with_room))
}

/// PUT /api/v1/students/me
///
/// Allow-listed self update; the room link is never touched.
pub async fn update_me(
    user: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<UpdateOwnProfile>,
) -> AppResult<Json<Student>> {
    input.validate()?;
    check_year(input.year.as_deref())?;
    let student = student_for_user(&state, user.user_id).await?;
    let update = UpdateStudent::from(input);
    let updated = StudentRepo::update(&state.pool, student.id, &update)
        .await?
        .ok_or_else(|| not_found(student.id))?;
    Ok(Json(updated))
}

/// GET /api/v1/students/by-student-id/{code}
pub async fn get_by_code(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> AppResult<Json<Student>> {
    Ok(Json(student_by_code(&state, &code).await?))
}

/// GET /api/v1/students/room/{room_id}
pub async fn list_by_room(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(room_id): Path<DbId>,
) -> AppResult<Json<Vec<Student>>> {
    Ok(Json(StudentRepo::list_by_room(&state.pool, room_id).await?))
}

/// GET /api/v1/students/{id}
pub async fn get_by_id(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<StudentWithRoom>> {
    let student = StudentRepo::find_with_room(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(student))
}

/// POST /api/v1/students
///
/// Creates the student login, then the profile, then records the student
/// in its requested room. A failed profile insert deletes the login again.
/// A requested room that does not exist is dropped, not rejected.
pub async fn create(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateStudentRequest>,
) -> AppResult<(StatusCode, Json<Student>)> {
    input.validate()?;
    check_year(input.year.as_deref())?;
    validate_password_strength(&input.password, MIN_PASSWORD_LENGTH)
        .map_err(AppError::BadRequest)?;

    if UserRepo::login_taken(&state.pool, &input.student_id, Some(&input.student_id)).await? {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "A login for student id '{}' already exists",
            input.student_id
        ))));
    }

    let mut room_id = input.room_id;
    if let Some(requested) = room_id {
        if RoomRepo::find_by_id(&state.pool, requested).await?.is_none() {
            tracing::warn!(
                room_id = requested,
                student_code = %input.student_id,
                "Requested room does not exist; creating student without a room"
            );
            room_id = None;
        }
    }

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing failed: {e}")))?;
    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            username: input.student_id.clone(),
            password_hash,
            role: ROLE_STUDENT.to_string(),
            student_code: Some(input.student_id.clone()),
            display_name: Some(input.name.clone()),
            email: None,
        },
    )
    .await?;

    let profile = CreateStudent {
        student_code: input.student_id,
        name: input.name,
        email: input.email,
        phone: input.phone,
        room_id,
        user_id: user.id,
        photo_url: input.photo_url,
        guardian_name: input.guardian_name,
        address: input.address,
        year: input.year,
        branch: input.branch,
    };
    let student = match StudentRepo::create(&state.pool, &profile).await {
        Ok(student) => student,
        Err(e) => {
            if let Err(cleanup) = UserRepo::delete(&state.pool, user.id).await {
                tracing::error!(user_id = user.id, error = %cleanup, "Failed to remove orphaned student login");
            }
            return Err(e.into());
        }
    };

    let step = state.rooms().assign_on_create(student.id, student.room_id).await;
    report_room_step("assign_on_create", student.id, step);

    tracing::info!(student_id = student.id, created_by = admin.user_id, "Student created");
    Ok((StatusCode::CREATED, Json(student)))
}

/// PUT /api/v1/students/{id}
///
/// An absent `room_id` leaves the room alone; an explicit `null` unassigns.
pub async fn update(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateStudent>,
) -> AppResult<Json<Student>> {
    input.validate()?;
    check_year(input.year.as_deref())?;

    let before = StudentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    let after = StudentRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;

    if input.changes_room() {
        let step = state
            .rooms()
            .reassign_on_update(id, before.room_id, after.room_id)
            .await;
        report_room_step("reassign_on_update", id, step);
    }

    Ok(Json(after))
}

/// DELETE /api/v1/students/{id}
///
/// Removes the student from its room, then deletes the profile and its login.
/// A failed room write aborts the delete and leaves the student in place.
pub async fn delete(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let student = StudentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;

    let outcome = state
        .rooms()
        .detach_on_delete(id, student.room_id)
        .await
        .map_err(|e| {
            tracing::error!(student_id = id, error = %e, "Room detach failed; student kept");
            AppError::Core(e)
        })?;
    tracing::debug!(student_id = id, ?outcome, "Room assignment step done");

    if !StudentRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }
    UserRepo::delete(&state.pool, student.user_id).await?;

    tracing::info!(student_id = id, deleted_by = admin.user_id, "Student deleted");
    Ok(StatusCode::NO_CONTENT)
}
