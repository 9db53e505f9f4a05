//! Repository for the `attendance_records` table.

use hostel_core::attendance::NewMark;
use hostel_core::types::{CalendarDate, DbId};
use sqlx::PgPool;

use crate::models::attendance::{AttendanceFilter, AttendanceRecord, UpdateAttendance};

/// Columns of an attendance row `a` joined with its student `s`.
const COLUMNS: &str = "a.id, a.student_id, s.name AS student_name, s.student_code, a.date, \
                       a.status, a.marked_by, a.created_at, a.updated_at";

/// Provides upsert building blocks and CRUD for attendance records.
pub struct AttendanceRepo;

impl AttendanceRepo {
    /// Insert a record. Fails on `uq_attendance_student_date` when the
    /// student already has a record for that day.
    pub async fn insert(pool: &PgPool, mark: &NewMark) -> Result<AttendanceRecord, sqlx::Error> {
        let query = format!(
            "WITH a AS (
                INSERT INTO attendance_records (student_id, date, status, marked_by)
                VALUES ($1, $2, $3, $4)
                RETURNING *
             )
             SELECT {COLUMNS} FROM a JOIN students s ON s.id = a.student_id"
        );
        sqlx::query_as::<_, AttendanceRecord>(&query)
            .bind(mark.student_id)
            .bind(mark.date)
            .bind(mark.status.as_str())
            .bind(mark.marked_by)
            .fetch_one(pool)
            .await
    }

    /// Id of the record for a student on a given day.
    pub async fn find_id_for(
        pool: &PgPool,
        student_id: DbId,
        date: CalendarDate,
    ) -> Result<Option<DbId>, sqlx::Error> {
        sqlx::query_scalar("SELECT id FROM attendance_records WHERE student_id = $1 AND date = $2")
            .bind(student_id)
            .bind(date)
            .fetch_optional(pool)
            .await
    }

    /// Find a record by internal ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<AttendanceRecord>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS}
             FROM attendance_records a JOIN students s ON s.id = a.student_id
             WHERE a.id = $1"
        );
        sqlx::query_as::<_, AttendanceRecord>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List records matching every supplied filter, newest day first.
    pub async fn list(
        pool: &PgPool,
        filter: &AttendanceFilter,
    ) -> Result<Vec<AttendanceRecord>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS}
             FROM attendance_records a JOIN students s ON s.id = a.student_id
             WHERE ($1::TEXT IS NULL OR s.student_code = $1)
               AND ($2::TEXT IS NULL OR a.status = $2)
               AND ($3::DATE IS NULL OR a.date >= $3)
               AND ($4::DATE IS NULL OR a.date <= $4)
             ORDER BY a.date DESC, a.id DESC"
        );
        sqlx::query_as::<_, AttendanceRecord>(&query)
            .bind(&filter.student_code)
            .bind(&filter.status)
            .bind(filter.start_date)
            .bind(filter.end_date)
            .fetch_all(pool)
            .await
    }

    /// Statuses recorded for one student within an optional date range.
    pub async fn statuses_for(
        pool: &PgPool,
        student_id: DbId,
        start_date: Option<CalendarDate>,
        end_date: Option<CalendarDate>,
    ) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT status FROM attendance_records
             WHERE student_id = $1
               AND ($2::DATE IS NULL OR date >= $2)
               AND ($3::DATE IS NULL OR date <= $3)",
        )
        .bind(student_id)
        .bind(start_date)
        .bind(end_date)
        .fetch_all(pool)
        .await
    }

    /// Replace status and marker of an existing record.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn overwrite(
        pool: &PgPool,
        id: DbId,
        status: &str,
        marked_by: Option<DbId>,
    ) -> Result<Option<AttendanceRecord>, sqlx::Error> {
        let query = format!(
            "WITH a AS (
                UPDATE attendance_records SET status = $2, marked_by = $3
                WHERE id = $1
                RETURNING *
             )
             SELECT {COLUMNS} FROM a JOIN students s ON s.id = a.student_id"
        );
        sqlx::query_as::<_, AttendanceRecord>(&query)
            .bind(id)
            .bind(status)
            .bind(marked_by)
            .fetch_optional(pool)
            .await
    }

    /// Correct date and/or status of a record, stamping the new marker.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateAttendance,
        marked_by: Option<DbId>,
    ) -> Result<Option<AttendanceRecord>, sqlx::Error> {
        let query = format!(
            "WITH a AS (
                UPDATE attendance_records SET
                    date = COALESCE($2, date),
                    status = COALESCE($3, status),
                    marked_by = COALESCE($4, marked_by)
                WHERE id = $1
                RETURNING *
             )
             SELECT {COLUMNS} FROM a JOIN students s ON s.id = a.student_id"
        );
        sqlx::query_as::<_, AttendanceRecord>(&query)
            .bind(id)
            .bind(input.date)
            .bind(&input.status)
            .bind(marked_by)
            .fetch_optional(pool)
            .await
    }

    /// Delete a record. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM attendance_records WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
