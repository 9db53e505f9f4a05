//! Handlers for the caller's own account under `/users`.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use hostel_core::error::CoreError;
use hostel_db::models::user::{UpdateUserProfile, User, UserResponse};
use hostel_db::repositories::UserRepo;
use serde::Deserialize;
use validator::Validate;

use crate::auth::password::{
    hash_password, validate_password_strength, verify_password, MIN_PASSWORD_LENGTH,
};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Request body for `POST /users/change-password`.
#[derive(Debug, Deserialize)]
pub struct ChangePasswordRequest {
    pub current_password: Option<String>,
    pub new_password: Option<String>,
}

async fn load_self(state: &AppState, user: &AuthUser) -> AppResult<User> {
    UserRepo::find_by_id(&state.pool, user.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: user.user_id,
        }))
}

/// GET /api/v1/users/me
pub async fn me(user: AuthUser, State(state): State<AppState>) -> AppResult<Json<UserResponse>> {
    Ok(Json(load_self(&state, &user).await?.into()))
}

/// PUT /api/v1/users/me
pub async fn update_me(
    user: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<UpdateUserProfile>,
) -> AppResult<Json<UserResponse>> {
    input.validate()?;
    let updated = UserRepo::update_profile(&state.pool, user.user_id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: user.user_id,
        }))?;
    Ok(Json(updated.into()))
}

/// POST /api/v1/users/change-password
///
/// Non-admins must prove the current password.
pub async fn change_password(
    user: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<ChangePasswordRequest>,
) -> AppResult<StatusCode> {
    let new_password = input
        .new_password
        .filter(|p| !p.is_empty())
        .ok_or_else(|| AppError::BadRequest("New password required".into()))?;
    validate_password_strength(&new_password, MIN_PASSWORD_LENGTH)
        .map_err(AppError::BadRequest)?;

    let account = load_self(&state, &user).await?;
    if !user.is_admin() {
        let current = input.current_password.unwrap_or_default();
        let ok = verify_password(&current, &account.password_hash)
            .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
        if !ok {
            return Err(AppError::Core(CoreError::Unauthorized(
                "Current password incorrect".into(),
            )));
        }
    }

    let password_hash = hash_password(&new_password)
        .map_err(|e| AppError::InternalError(format!("Password hashing failed: {e}")))?;
    UserRepo::update_password(&state.pool, account.id, &password_hash).await?;
    tracing::info!(user_id = account.id, "Password changed");
    Ok(StatusCode::NO_CONTENT)
}
