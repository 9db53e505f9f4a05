//! Repository for the `rooms` table.

use hostel_core::room_assignment::{DEFAULT_BLOCK, DEFAULT_CAPACITY};
use hostel_core::types::DbId;
use sqlx::PgPool;

use crate::models::room::{CreateRoom, Room, UpdateRoom};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, block, room_number, floor, capacity, occupants, status, \
                       student_ids, created_at, updated_at";

/// Provides CRUD operations for rooms plus the occupancy write used by the
/// room assignment coordinator.
pub struct RoomRepo;

impl RoomRepo {
    /// Insert a new room with empty occupancy, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateRoom) -> Result<Room, sqlx::Error> {
        let query = format!(
            "INSERT INTO rooms (block, room_number, floor, capacity, status)
             VALUES ($1, $2, $3, $4, COALESCE($5, 'vacant'))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Room>(&query)
            .bind(input.block.as_deref().unwrap_or(DEFAULT_BLOCK))
            .bind(input.room_number)
            .bind(input.floor)
            .bind(input.capacity.unwrap_or(DEFAULT_CAPACITY))
            .bind(&input.status)
            .fetch_one(pool)
            .await
    }

    /// Find a room by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Room>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM rooms WHERE id = $1");
        sqlx::query_as::<_, Room>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a room by its room number.
    pub async fn find_by_number(
        pool: &PgPool,
        room_number: i32,
    ) -> Result<Option<Room>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM rooms WHERE room_number = $1");
        sqlx::query_as::<_, Room>(&query)
            .bind(room_number)
            .fetch_optional(pool)
            .await
    }

    /// List all rooms ordered by room number.
    pub async fn list(pool: &PgPool) -> Result<Vec<Room>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM rooms ORDER BY room_number");
        sqlx::query_as::<_, Room>(&query).fetch_all(pool).await
    }

    /// Update a room's administrative fields. Only non-`None` fields are applied.
    ///
    /// A `status` written here is authoritative until the next coordinator
    /// recompute. Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateRoom,
    ) -> Result<Option<Room>, sqlx::Error> {
        let query = format!(
            "UPDATE rooms SET
                block = COALESCE($2, block),
                room_number = COALESCE($3, room_number),
                floor = COALESCE($4, floor),
                capacity = COALESCE($5, capacity),
                status = COALESCE($6, status)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Room>(&query)
            .bind(id)
            .bind(&input.block)
            .bind(input.room_number)
            .bind(input.floor)
            .bind(input.capacity)
            .bind(&input.status)
            .fetch_optional(pool)
            .await
    }

    /// Overwrite the occupancy fields of a room.
    ///
    /// Returns `true` if the row was updated.
    pub async fn store_occupancy(
        pool: &PgPool,
        id: DbId,
        student_ids: &[DbId],
        occupants: i32,
        status: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE rooms SET student_ids = $2, occupants = $3, status = $4 WHERE id = $1",
        )
        .bind(id)
        .bind(student_ids)
        .bind(occupants)
        .bind(status)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete a room. Students pointing at it have `room_id` cleared by the
    /// foreign key. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM rooms WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
