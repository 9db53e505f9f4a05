//! Repository for the `leaves` table.

use hostel_core::types::DbId;
use sqlx::PgPool;

use crate::models::leave::{CreateLeave, Leave};

/// Columns of a leave row `l` joined with its student `s`.
const COLUMNS: &str = "l.id, l.student_id, s.name AS student_name, s.student_code, l.name, \
                       l.hostel_no, l.leave_type, l.visit_place, l.start_date, l.start_time, \
                       l.end_date, l.end_time, l.reason, l.mobile, l.days, l.status, \
                       l.applied_on, l.reviewed_by, l.reviewed_at, l.review_notes, \
                       l.created_at, l.updated_at";

/// Provides CRUD operations for leave applications.
pub struct LeaveRepo;

impl LeaveRepo {
    /// Insert a new leave in `Pending`, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateLeave) -> Result<Leave, sqlx::Error> {
        let query = format!(
            "WITH l AS (
                INSERT INTO leaves (student_id, name, hostel_no, leave_type, visit_place,
                                    start_date, start_time, end_date, end_time, reason,
                                    mobile, days)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
                RETURNING *
             )
             SELECT {COLUMNS} FROM l JOIN students s ON s.id = l.student_id"
        );
        sqlx::query_as::<_, Leave>(&query)
            .bind(input.student_id)
            .bind(&input.name)
            .bind(&input.hostel_no)
            .bind(&input.leave_type)
            .bind(&input.visit_place)
            .bind(input.start_date)
            .bind(&input.start_time)
            .bind(input.end_date)
            .bind(&input.end_time)
            .bind(&input.reason)
            .bind(&input.mobile)
            .bind(input.days)
            .fetch_one(pool)
            .await
    }

    /// Find a leave by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Leave>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM leaves l JOIN students s ON s.id = l.student_id
             WHERE l.id = $1"
        );
        sqlx::query_as::<_, Leave>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List leaves, optionally narrowed to one status, most recent first.
    pub async fn list(pool: &PgPool, status: Option<&str>) -> Result<Vec<Leave>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM leaves l JOIN students s ON s.id = l.student_id
             WHERE ($1::TEXT IS NULL OR l.status = $1)
             ORDER BY l.applied_on DESC, l.id DESC"
        );
        sqlx::query_as::<_, Leave>(&query)
            .bind(status)
            .fetch_all(pool)
            .await
    }

    /// List one student's leaves, most recent first.
    pub async fn list_by_student(
        pool: &PgPool,
        student_id: DbId,
        status: Option<&str>,
    ) -> Result<Vec<Leave>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM leaves l JOIN students s ON s.id = l.student_id
             WHERE l.student_id = $1 AND ($2::TEXT IS NULL OR l.status = $2)
             ORDER BY l.applied_on DESC, l.id DESC"
        );
        sqlx::query_as::<_, Leave>(&query)
            .bind(student_id)
            .bind(status)
            .fetch_all(pool)
            .await
    }

    /// Record an admin review, stamping reviewer and time.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn review(
        pool: &PgPool,
        id: DbId,
        status: Option<&str>,
        review_notes: Option<&str>,
        reviewed_by: DbId,
    ) -> Result<Option<Leave>, sqlx::Error> {
        let query = format!(
            "WITH l AS (
                UPDATE leaves SET
                    status = COALESCE($2, status),
                    review_notes = COALESCE($3, review_notes),
                    reviewed_by = $4,
                    reviewed_at = NOW()
                WHERE id = $1
                RETURNING *
             )
             SELECT {COLUMNS} FROM l JOIN students s ON s.id = l.student_id"
        );
        sqlx::query_as::<_, Leave>(&query)
            .bind(id)
            .bind(status)
            .bind(review_notes)
            .bind(reviewed_by)
            .fetch_optional(pool)
            .await
    }

    /// Delete a leave. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM leaves WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
