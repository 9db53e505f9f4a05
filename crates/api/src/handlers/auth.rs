//! Handlers for the `/auth` resource (login, register).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use hostel_core::error::CoreError;
use hostel_core::roles::{normalize_role, ROLE_STUDENT};
use hostel_core::types::DbId;
use hostel_db::models::student::Student;
use hostel_db::models::user::{CreateUser, UserResponse};
use hostel_db::repositories::{StudentRepo, UserRepo};
use serde::{Deserialize, Serialize};

use crate::auth::jwt::generate_access_token;
use crate::auth::password::{
    hash_password, validate_password_strength, verify_password, MIN_PASSWORD_LENGTH,
};
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/login`.
///
/// `id` is a username or an external student id. Fields are optional so a
/// missing one is reported as 400 rather than a deserialization failure.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub id: Option<String>,
    pub password: Option<String>,
    pub role: Option<String>,
}

/// Successful authentication response.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    /// Token lifetime in seconds.
    pub expires_in: i64,
    pub user: SessionUser,
}

/// Public user info embedded in [`AuthResponse`].
#[derive(Debug, Serialize)]
pub struct SessionUser {
    pub id: DbId,
    pub role: String,
    pub student_id: Option<String>,
    pub student_info: Option<Student>,
}

/// Request body for `POST /auth/register`.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub role: String,
    pub student_id: Option<String>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let (Some(id), Some(password), Some(role)) = (
        input.id.filter(|s| !s.is_empty()),
        input.password.filter(|s| !s.is_empty()),
        input.role.filter(|s| !s.is_empty()),
    ) else {
        return Err(AppError::BadRequest("All fields are required".into()));
    };

    let rejected = || {
        AppError::Core(CoreError::Unauthorized(format!(
            "Incorrect {role} ID or Password"
        )))
    };

    let role_name = normalize_role(&role).ok_or_else(rejected)?;
    let user = UserRepo::find_by_login(&state.pool, &id, role_name)
        .await?
        .ok_or_else(rejected)?;

    let password_valid = verify_password(&password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        tracing::info!(user_id = user.id, "Rejected login: wrong password");
        return Err(rejected());
    }

    // The profile follows `students.user_id`; the login's own code may be stale.
    let student_info = if user.role == ROLE_STUDENT {
        StudentRepo::find_by_user_id(&state.pool, user.id).await?
    } else {
        None
    };

    let token = generate_access_token(
        user.id,
        &user.role,
        user.student_code.as_deref(),
        &state.config.jwt,
    )
    .map_err(|e| AppError::InternalError(format!("Token generation failed: {e}")))?;

    tracing::info!(user_id = user.id, role = %user.role, "User logged in");

    Ok(Json(AuthResponse {
        token,
        expires_in: state.config.jwt.expires_in_secs(),
        user: SessionUser {
            id: user.id,
            role: user.role,
            student_id: user.student_code,
            student_info,
        },
    }))
}

/// POST /api/v1/auth/register
///
/// Admin-only creation of a bare login.
pub async fn register(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    let role = normalize_role(&input.role).ok_or_else(|| {
        AppError::BadRequest(format!("Unknown role '{}'", input.role))
    })?;
    validate_password_strength(&input.password, MIN_PASSWORD_LENGTH)
        .map_err(AppError::BadRequest)?;

    let student_code = input.student_id.filter(|s| !s.is_empty());
    if UserRepo::login_taken(&state.pool, &input.username, student_code.as_deref()).await? {
        return Err(AppError::Core(CoreError::Conflict(
            "User already exists".into(),
        )));
    }

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing failed: {e}")))?;
    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            username: input.username,
            password_hash,
            role: role.to_string(),
            student_code,
            display_name: None,
            email: None,
        },
    )
    .await?;

    tracing::info!(user_id = user.id, created_by = admin.user_id, "User registered");
    Ok((StatusCode::CREATED, Json(user.into())))
}
