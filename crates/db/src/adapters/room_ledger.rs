use async_trait::async_trait;
use hostel_core::error::CoreError;
use hostel_core::room_assignment::{RoomLedger, RoomMembership, RoomStatus};
use hostel_core::types::DbId;
use sqlx::PgPool;

use super::into_core;
use crate::repositories::{RoomRepo, StudentRepo};

/// Room occupancy stored in `rooms.student_ids` / `occupants` / `status`,
/// with `students.room_id` as the source of truth for residents.
#[derive(Clone)]
pub struct PgRoomLedger {
    pool: PgPool,
}

impl PgRoomLedger {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RoomLedger for PgRoomLedger {
    async fn load(&self, room_id: DbId) -> Result<Option<RoomMembership>, CoreError> {
        let Some(room) = RoomRepo::find_by_id(&self.pool, room_id)
            .await
            .map_err(into_core)?
        else {
            return Ok(None);
        };
        let status = RoomStatus::from_str(&room.status)
            .map_err(|e| CoreError::Internal(format!("room {room_id}: {e}")))?;
        Ok(Some(RoomMembership {
            room_id: room.id,
            student_ids: room.student_ids,
            occupants: room.occupants,
            status,
        }))
    }

    async fn store(&self, membership: &RoomMembership) -> Result<(), CoreError> {
        let updated = RoomRepo::store_occupancy(
            &self.pool,
            membership.room_id,
            &membership.student_ids,
            membership.occupants,
            membership.status.as_str(),
        )
        .await
        .map_err(into_core)?;
        if !updated {
            return Err(CoreError::NotFound {
                entity: "Room",
                id: membership.room_id,
            });
        }
        Ok(())
    }

    async fn residents(&self, room_id: DbId) -> Result<Vec<DbId>, CoreError> {
        StudentRepo::resident_ids(&self.pool, room_id)
            .await
            .map_err(into_core)
    }
}
