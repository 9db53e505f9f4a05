//! User (credential) entity model and DTOs.

use hostel_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Full user row from the `users` table.
///
/// Contains the password hash -- NEVER serialize this to API responses directly.
/// Use [`UserResponse`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub username: String,
    pub password_hash: String,
    pub role: String,
    /// External student id for student accounts.
    pub student_code: Option<String>,
    pub display_name: Option<String>,
    pub email: Option<String>,
    pub photo_url: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Safe user representation for API responses (no password hash).
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: DbId,
    pub username: String,
    pub role: String,
    pub student_id: Option<String>,
    pub display_name: Option<String>,
    pub email: Option<String>,
    pub photo_url: Option<String>,
    pub created_at: Timestamp,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            role: user.role,
            student_id: user.student_code,
            display_name: user.display_name,
            email: user.email,
            photo_url: user.photo_url,
            created_at: user.created_at,
        }
    }
}

/// DTO for creating a new user. The password is already hashed.
#[derive(Debug)]
pub struct CreateUser {
    pub username: String,
    pub password_hash: String,
    pub role: String,
    pub student_code: Option<String>,
    pub display_name: Option<String>,
    pub email: Option<String>,
}

/// Self-service profile update. Only these fields are ever written.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateUserProfile {
    #[validate(length(min = 1, max = 100))]
    pub display_name: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(max = 2048))]
    pub photo_url: Option<String>,
}
