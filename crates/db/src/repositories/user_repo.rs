//! Repository for the `users` table.

use hostel_core::types::DbId;
use sqlx::PgPool;

use crate::models::user::{CreateUser, UpdateUserProfile, User};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, username, password_hash, role, student_code, display_name, \
                       email, photo_url, created_at, updated_at";

/// Provides CRUD operations for login credentials.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (username, password_hash, role, student_code, display_name, email)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.username)
            .bind(&input.password_hash)
            .bind(&input.role)
            .bind(&input.student_code)
            .bind(&input.display_name)
            .bind(&input.email)
            .fetch_one(pool)
            .await
    }

    /// Find a user by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by username (case-sensitive).
    pub async fn find_by_username(
        pool: &PgPool,
        username: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE username = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(username)
            .fetch_optional(pool)
            .await
    }

    /// Find the account a login identifier refers to within one role.
    ///
    /// The identifier matches either the username or the external student id.
    pub async fn find_by_login(
        pool: &PgPool,
        identifier: &str,
        role: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM users
             WHERE (username = $1 OR student_code = $1) AND role = $2
             ORDER BY id
             LIMIT 1"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(identifier)
            .bind(role)
            .fetch_optional(pool)
            .await
    }

    /// Whether any account already uses this username or student id.
    pub async fn login_taken(
        pool: &PgPool,
        username: &str,
        student_code: Option<&str>,
    ) -> Result<bool, sqlx::Error> {
        let (taken,): (bool,) = sqlx::query_as(
            "SELECT EXISTS (
                SELECT 1 FROM users
                WHERE username = $1 OR ($2::TEXT IS NOT NULL AND student_code = $2)
             )",
        )
        .bind(username)
        .bind(student_code)
        .fetch_one(pool)
        .await?;
        Ok(taken)
    }

    /// Apply a self-service profile update. Only non-`None` fields are written.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update_profile(
        pool: &PgPool,
        id: DbId,
        input: &UpdateUserProfile,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "UPDATE users SET
                display_name = COALESCE($2, display_name),
                email = COALESCE($3, email),
                photo_url = COALESCE($4, photo_url)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(&input.display_name)
            .bind(&input.email)
            .bind(&input.photo_url)
            .fetch_optional(pool)
            .await
    }

    /// Update a user's password hash. Returns `true` if the row was updated.
    pub async fn update_password(
        pool: &PgPool,
        id: DbId,
        password_hash: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE users SET password_hash = $2 WHERE id = $1")
            .bind(id)
            .bind(password_hash)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete a user. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
