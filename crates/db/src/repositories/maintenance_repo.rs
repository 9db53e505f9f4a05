//! Repository for the `maintenance_requests` table.

use hostel_core::types::DbId;
use sqlx::PgPool;

use crate::models::maintenance::{CreateMaintenanceRequest, MaintenanceRequest};

/// Columns of a request row `m` joined with its student `s`.
const COLUMNS: &str = "m.id, m.student_id, s.name AS student_name, s.student_code, \
                       m.room_number, m.problem_type, m.title, m.description, m.status, \
                       m.reported_at, m.resolved_at, m.resolved_by, m.resolution_notes, \
                       m.created_at, m.updated_at";

/// Provides CRUD operations for maintenance requests.
pub struct MaintenanceRepo;

impl MaintenanceRepo {
    /// Report a problem for a student, returning the created row.
    pub async fn create(
        pool: &PgPool,
        student_id: DbId,
        input: &CreateMaintenanceRequest,
    ) -> Result<MaintenanceRequest, sqlx::Error> {
        let query = format!(
            "WITH m AS (
                INSERT INTO maintenance_requests
                    (student_id, room_number, problem_type, title, description)
                VALUES ($1, $2, $3, $4, $5)
                RETURNING *
             )
             SELECT {COLUMNS} FROM m JOIN students s ON s.id = m.student_id"
        );
        sqlx::query_as::<_, MaintenanceRequest>(&query)
            .bind(student_id)
            .bind(input.room_number)
            .bind(&input.problem_type)
            .bind(&input.title)
            .bind(&input.description)
            .fetch_one(pool)
            .await
    }

    /// Find a request by internal ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<MaintenanceRequest>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM maintenance_requests m JOIN students s ON s.id = m.student_id
             WHERE m.id = $1"
        );
        sqlx::query_as::<_, MaintenanceRequest>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List requests, optionally narrowed to one status, newest first.
    pub async fn list(
        pool: &PgPool,
        status: Option<&str>,
    ) -> Result<Vec<MaintenanceRequest>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM maintenance_requests m JOIN students s ON s.id = m.student_id
             WHERE ($1::TEXT IS NULL OR m.status = $1)
             ORDER BY m.created_at DESC, m.id DESC"
        );
        sqlx::query_as::<_, MaintenanceRequest>(&query)
            .bind(status)
            .fetch_all(pool)
            .await
    }

    /// List one student's requests, newest first.
    pub async fn list_by_student(
        pool: &PgPool,
        student_id: DbId,
        status: Option<&str>,
    ) -> Result<Vec<MaintenanceRequest>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM maintenance_requests m JOIN students s ON s.id = m.student_id
             WHERE m.student_id = $1 AND ($2::TEXT IS NULL OR m.status = $2)
             ORDER BY m.created_at DESC, m.id DESC"
        );
        sqlx::query_as::<_, MaintenanceRequest>(&query)
            .bind(student_id)
            .bind(status)
            .fetch_all(pool)
            .await
    }

    /// Apply an admin update. When `resolved_by` is set the request is
    /// stamped as resolved now by that user.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        status: Option<&str>,
        resolution_notes: Option<&str>,
        resolved_by: Option<DbId>,
    ) -> Result<Option<MaintenanceRequest>, sqlx::Error> {
        let query = format!(
            "WITH m AS (
                UPDATE maintenance_requests SET
                    status = COALESCE($2, status),
                    resolution_notes = COALESCE($3, resolution_notes),
                    resolved_at = CASE WHEN $4::BIGINT IS NULL THEN resolved_at ELSE NOW() END,
                    resolved_by = COALESCE($4, resolved_by)
                WHERE id = $1
                RETURNING *
             )
             SELECT {COLUMNS} FROM m JOIN students s ON s.id = m.student_id"
        );
        sqlx::query_as::<_, MaintenanceRequest>(&query)
            .bind(id)
            .bind(status)
            .bind(resolution_notes)
            .bind(resolved_by)
            .fetch_optional(pool)
            .await
    }

    /// Delete a request. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM maintenance_requests WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
