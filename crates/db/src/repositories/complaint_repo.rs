//! Repository for the `complaints` table.

use hostel_core::types::DbId;
use sqlx::PgPool;

use crate::models::complaint::{Complaint, CreateComplaint};

/// Columns of a complaint row `c` joined with its student `s`.
const COLUMNS: &str = "c.id, c.student_id, s.name AS student_name, s.student_code, c.title, \
                       c.category, c.description, c.status, c.submitted_at, c.resolved_at, \
                       c.resolution_message, c.resolved_by, c.created_at, c.updated_at";

/// Provides CRUD operations for complaints.
pub struct ComplaintRepo;

impl ComplaintRepo {
    /// File a complaint for a student, returning the created row.
    pub async fn create(
        pool: &PgPool,
        student_id: DbId,
        input: &CreateComplaint,
    ) -> Result<Complaint, sqlx::Error> {
        let query = format!(
            "WITH c AS (
                INSERT INTO complaints (student_id, title, category, description)
                VALUES ($1, $2, $3, $4)
                RETURNING *
             )
             SELECT {COLUMNS} FROM c JOIN students s ON s.id = c.student_id"
        );
        sqlx::query_as::<_, Complaint>(&query)
            .bind(student_id)
            .bind(&input.title)
            .bind(&input.category)
            .bind(&input.description)
            .fetch_one(pool)
            .await
    }

    /// Find a complaint by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Complaint>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM complaints c JOIN students s ON s.id = c.student_id
             WHERE c.id = $1"
        );
        sqlx::query_as::<_, Complaint>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List complaints, optionally narrowed to one status, newest first.
    pub async fn list(pool: &PgPool, status: Option<&str>) -> Result<Vec<Complaint>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM complaints c JOIN students s ON s.id = c.student_id
             WHERE ($1::TEXT IS NULL OR c.status = $1)
             ORDER BY c.created_at DESC, c.id DESC"
        );
        sqlx::query_as::<_, Complaint>(&query)
            .bind(status)
            .fetch_all(pool)
            .await
    }

    /// List one student's complaints, newest first.
    pub async fn list_by_student(
        pool: &PgPool,
        student_id: DbId,
        status: Option<&str>,
    ) -> Result<Vec<Complaint>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM complaints c JOIN students s ON s.id = c.student_id
             WHERE c.student_id = $1 AND ($2::TEXT IS NULL OR c.status = $2)
             ORDER BY c.created_at DESC, c.id DESC"
        );
        sqlx::query_as::<_, Complaint>(&query)
            .bind(student_id)
            .bind(status)
            .fetch_all(pool)
            .await
    }

    /// Apply an admin update. When `resolved_by` is set the complaint is
    /// stamped as resolved now by that user.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        status: Option<&str>,
        resolution_message: Option<&str>,
        resolved_by: Option<DbId>,
    ) -> Result<Option<Complaint>, sqlx::Error> {
        let query = format!(
            "WITH c AS (
                UPDATE complaints SET
                    status = COALESCE($2, status),
                    resolution_message = COALESCE($3, resolution_message),
                    resolved_at = CASE WHEN $4::BIGINT IS NULL THEN resolved_at ELSE NOW() END,
                    resolved_by = COALESCE($4, resolved_by)
                WHERE id = $1
                RETURNING *
             )
             SELECT {COLUMNS} FROM c JOIN students s ON s.id = c.student_id"
        );
        sqlx::query_as::<_, Complaint>(&query)
            .bind(id)
            .bind(status)
            .bind(resolution_message)
            .bind(resolved_by)
            .fetch_optional(pool)
            .await
    }

    /// Delete a complaint. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM complaints WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
