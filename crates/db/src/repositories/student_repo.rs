//! Repository for the `students` table.

use hostel_core::types::DbId;
use sqlx::PgPool;

use crate::models::room::RoomResident;
use crate::models::student::{CreateStudent, Student, StudentWithRoom, UpdateStudent};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, student_code, name, email, phone, room_id, user_id, photo_url, \
                       guardian_name, address, year, branch, created_at, updated_at";

/// Student columns qualified for joins against `rooms`.
const JOINED_COLUMNS: &str = "s.id, s.student_code, s.name, s.email, s.phone, s.room_id, \
                              s.user_id, s.photo_url, s.guardian_name, s.address, s.year, \
                              s.branch, s.created_at, s.updated_at, \
                              r.room_number, r.block AS room_block, r.floor AS room_floor";

/// Provides CRUD operations for student profiles.
pub struct StudentRepo;

impl StudentRepo {
    /// Insert a new student, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateStudent) -> Result<Student, sqlx::Error> {
        let query = format!(
            "INSERT INTO students (student_code, name, email, phone, room_id, user_id,
                                   photo_url, guardian_name, address, year, branch)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Student>(&query)
            .bind(&input.student_code)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(input.room_id)
            .bind(input.user_id)
            .bind(&input.photo_url)
            .bind(&input.guardian_name)
            .bind(&input.address)
            .bind(&input.year)
            .bind(&input.branch)
            .fetch_one(pool)
            .await
    }

    /// Find a student by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Student>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM students WHERE id = $1");
        sqlx::query_as::<_, Student>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a student by external student id.
    pub async fn find_by_code(
        pool: &PgPool,
        student_code: &str,
    ) -> Result<Option<Student>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM students WHERE student_code = $1");
        sqlx::query_as::<_, Student>(&query)
            .bind(student_code)
            .fetch_optional(pool)
            .await
    }

    /// Find the profile linked to a login.
    pub async fn find_by_user_id(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<Student>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM students WHERE user_id = $1");
        sqlx::query_as::<_, Student>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Find a student with its room summary.
    pub async fn find_with_room(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<StudentWithRoom>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS}
             FROM students s LEFT JOIN rooms r ON r.id = s.room_id
             WHERE s.id = $1"
        );
        sqlx::query_as::<_, StudentWithRoom>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all students with their room summaries, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<StudentWithRoom>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS}
             FROM students s LEFT JOIN rooms r ON r.id = s.room_id
             ORDER BY s.created_at DESC, s.id DESC"
        );
        sqlx::query_as::<_, StudentWithRoom>(&query)
            .fetch_all(pool)
            .await
    }

    /// List the students whose `room_id` is the given room.
    pub async fn list_by_room(pool: &PgPool, room_id: DbId) -> Result<Vec<Student>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM students WHERE room_id = $1 ORDER BY id");
        sqlx::query_as::<_, Student>(&query)
            .bind(room_id)
            .fetch_all(pool)
            .await
    }

    /// Ids of the students pointing at a room, oldest first.
    pub async fn resident_ids(pool: &PgPool, room_id: DbId) -> Result<Vec<DbId>, sqlx::Error> {
        sqlx::query_scalar("SELECT id FROM students WHERE room_id = $1 ORDER BY id")
            .bind(room_id)
            .fetch_all(pool)
            .await
    }

    /// Resolve student ids (as listed on rooms) to short summaries.
    pub async fn residents_by_ids(
        pool: &PgPool,
        ids: &[DbId],
    ) -> Result<Vec<RoomResident>, sqlx::Error> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        sqlx::query_as::<_, RoomResident>(
            "SELECT id, student_code, name, email, phone FROM students WHERE id = ANY($1)",
        )
        .bind(ids)
        .fetch_all(pool)
        .await
    }

    /// Update a student. Only non-`None` fields in `input` are applied;
    /// `room_id` of `Some(None)` clears the room link.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateStudent,
    ) -> Result<Option<Student>, sqlx::Error> {
        let query = format!(
            "UPDATE students SET
                student_code = COALESCE($2, student_code),
                name = COALESCE($3, name),
                email = COALESCE($4, email),
                phone = COALESCE($5, phone),
                room_id = CASE WHEN $6 THEN $7 ELSE room_id END,
                photo_url = COALESCE($8, photo_url),
                guardian_name = COALESCE($9, guardian_name),
                address = COALESCE($10, address),
                year = COALESCE($11, year),
                branch = COALESCE($12, branch)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Student>(&query)
            .bind(id)
            .bind(&input.student_code)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(input.changes_room())
            .bind(input.room_id.flatten())
            .bind(&input.photo_url)
            .bind(&input.guardian_name)
            .bind(&input.address)
            .bind(&input.year)
            .bind(&input.branch)
            .fetch_optional(pool)
            .await
    }

    /// Delete a student. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM students WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
