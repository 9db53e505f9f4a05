//! Room entity model and DTOs.

use hostel_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `rooms` table.
///
/// `student_ids`, `occupants` and `status` are maintained by the room
/// assignment coordinator; `status` may also be set directly by an admin.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Room {
    pub id: DbId,
    pub block: String,
    pub room_number: i32,
    pub floor: i32,
    pub capacity: i32,
    pub occupants: i32,
    pub status: String,
    pub student_ids: Vec<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Short student view embedded in room responses.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RoomResident {
    pub id: DbId,
    #[serde(rename = "student_id")]
    pub student_code: String,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// A room with its listed students resolved, in list order.
#[derive(Debug, Clone, Serialize)]
pub struct RoomWithStudents {
    #[serde(flatten)]
    pub room: Room,
    pub students: Vec<RoomResident>,
}

impl RoomWithStudents {
    /// Pair a room with residents, ordered as in `room.student_ids`.
    ///
    /// Ids that do not resolve to a resident are skipped.
    pub fn assemble(room: Room, residents: &[RoomResident]) -> Self {
        let students = room
            .student_ids
            .iter()
            .filter_map(|id| residents.iter().find(|r| r.id == *id).cloned())
            .collect();
        Self { room, students }
    }
}

/// DTO for creating a room. Occupancy fields are never accepted as input.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateRoom {
    #[validate(length(min = 1, max = 10))]
    pub block: Option<String>,
    #[validate(range(min = 1))]
    pub room_number: i32,
    pub floor: i32,
    #[validate(range(min = 1))]
    pub capacity: Option<i32>,
    pub status: Option<String>,
}

/// DTO for updating a room. All fields are optional.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateRoom {
    #[validate(length(min = 1, max = 10))]
    pub block: Option<String>,
    #[validate(range(min = 1))]
    pub room_number: Option<i32>,
    pub floor: Option<i32>,
    #[validate(range(min = 1))]
    pub capacity: Option<i32>,
    pub status: Option<String>,
}
