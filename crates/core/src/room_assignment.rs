//! Room Assignment Coordinator.
//!
//! A student's `room_id` is the authoritative link between a student and a
//! room. A room's `student_ids`, `occupants` and `status` are a materialized
//! back-reference that this module keeps in step with those links across
//! student creation, reassignment and deletion.
//!
//! Every operation is a read-modify-write of a single room through the
//! [`RoomLedger`] port. None of them is transactional with the student write
//! that triggered it: callers persist the student first and treat a failed
//! room write as drift (see [`RoomDrift`]), never as a reason to undo the
//! student write. Two concurrent writers touching the same room can still
//! lose one update; [`RoomAssignmentCoordinator::reconcile`] repairs that.

use async_trait::async_trait;
use serde::Serialize;

use crate::error::CoreError;
use crate::macros::text_enum;
use crate::types::DbId;

/// Default room capacity when none is supplied.
pub const DEFAULT_CAPACITY: i32 = 4;

/// Default block label when none is supplied.
pub const DEFAULT_BLOCK: &str = "A";

text_enum! {
    /// Occupancy state of a room.
    ///
    /// `Vacant` and `Occupied` are derived from the member count by the
    /// coordinator. `Maintenance` is only ever set by an administrator.
    pub enum RoomStatus ("room status") {
        Vacant => "vacant",
        Occupied => "occupied",
        Maintenance => "maintenance",
    }
}

/// The occupancy fields of one room, as read from and written to the ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomMembership {
    pub room_id: DbId,
    /// Ordered back-reference list; insertion order is preserved.
    pub student_ids: Vec<DbId>,
    pub occupants: i32,
    pub status: RoomStatus,
}

impl RoomMembership {
    /// An empty, vacant room.
    pub fn vacant(room_id: DbId) -> Self {
        Self {
            room_id,
            student_ids: Vec::new(),
            occupants: 0,
            status: RoomStatus::Vacant,
        }
    }

    pub fn contains(&self, student_id: DbId) -> bool {
        self.student_ids.contains(&student_id)
    }

    /// Append a student to the room.
    ///
    /// Returns `false` and leaves the room untouched when the student is
    /// already listed. Otherwise recounts and marks the room `Occupied`,
    /// which also overrides `Maintenance`. Capacity is advisory and never
    /// checked.
    pub fn attach(&mut self, student_id: DbId) -> bool {
        if self.contains(student_id) {
            return false;
        }
        self.student_ids.push(student_id);
        self.recount();
        if self.occupants > 0 {
            self.status = RoomStatus::Occupied;
        }
        true
    }

    /// Remove a student from the room.
    ///
    /// Always recounts, and demotes the room to `Vacant` once it is empty
    /// regardless of its previous status. Returns whether any field changed.
    pub fn detach(&mut self, student_id: DbId) -> bool {
        let before = self.clone();
        self.student_ids.retain(|id| *id != student_id);
        self.recount();
        if self.occupants == 0 {
            self.status = RoomStatus::Vacant;
        }
        *self != before
    }

    /// Compare the room against the authoritative set of students whose
    /// `room_id` points at it.
    pub fn audit(&self, residents: &[DbId]) -> RoomDrift {
        let unlisted = residents
            .iter()
            .copied()
            .filter(|id| !self.contains(*id))
            .collect();

        let stale = self
            .student_ids
            .iter()
            .copied()
            .filter(|id| !residents.contains(id))
            .collect();

        let mut seen = Vec::with_capacity(self.student_ids.len());
        let mut duplicates = Vec::new();
        for id in &self.student_ids {
            if seen.contains(id) {
                if !duplicates.contains(id) {
                    duplicates.push(*id);
                }
            } else {
                seen.push(*id);
            }
        }

        RoomDrift {
            room_id: self.room_id,
            unlisted,
            stale,
            duplicates,
            recorded_occupants: self.occupants,
            actual_occupants: count(residents.len()),
            recorded_status: self.status,
            expected_status: expected_status(self.status, residents.len()),
        }
    }

    /// Rebuild the back-reference from the authoritative residents.
    ///
    /// Surviving members keep their order, missing residents are appended,
    /// duplicates collapse. `Maintenance` is preserved; otherwise the status
    /// is derived from the count. Returns whether any field changed.
    pub fn rebuild(&mut self, residents: &[DbId]) -> bool {
        let before = self.clone();

        let mut rebuilt: Vec<DbId> = Vec::with_capacity(residents.len());
        for id in self.student_ids.iter().chain(residents.iter()) {
            if residents.contains(id) && !rebuilt.contains(id) {
                rebuilt.push(*id);
            }
        }
        self.student_ids = rebuilt;
        self.recount();
        self.status = expected_status(self.status, self.student_ids.len());

        *self != before
    }

    fn recount(&mut self) {
        self.occupants = count(self.student_ids.len());
    }
}

fn count(len: usize) -> i32 {
    i32::try_from(len).unwrap_or(i32::MAX)
}

fn expected_status(current: RoomStatus, members: usize) -> RoomStatus {
    match (current, members) {
        (RoomStatus::Maintenance, _) => RoomStatus::Maintenance,
        (_, 0) => RoomStatus::Vacant,
        _ => RoomStatus::Occupied,
    }
}

/// Differences between a room's back-reference and the student pointers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoomDrift {
    pub room_id: DbId,
    /// Students pointing at the room but missing from its list.
    pub unlisted: Vec<DbId>,
    /// Listed students that no longer point at the room.
    pub stale: Vec<DbId>,
    /// Students listed more than once.
    pub duplicates: Vec<DbId>,
    pub recorded_occupants: i32,
    pub actual_occupants: i32,
    pub recorded_status: RoomStatus,
    pub expected_status: RoomStatus,
}

impl RoomDrift {
    pub fn is_clean(&self) -> bool {
        self.unlisted.is_empty()
            && self.stale.is_empty()
            && self.duplicates.is_empty()
            && self.recorded_occupants == self.actual_occupants
            && self.recorded_status == self.expected_status
    }
}

/// Storage port for room occupancy.
#[async_trait]
pub trait RoomLedger: Send + Sync {
    /// Load a room's occupancy fields, `None` when the room does not exist.
    async fn load(&self, room_id: DbId) -> Result<Option<RoomMembership>, CoreError>;

    /// Persist all occupancy fields of a room.
    async fn store(&self, membership: &RoomMembership) -> Result<(), CoreError>;

    /// Ids of the students whose `room_id` is this room, oldest first.
    async fn residents(&self, room_id: DbId) -> Result<Vec<DbId>, CoreError>;
}

/// What one coordinator step did to one room.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoomUpdate {
    /// No room was involved.
    Skipped,
    /// The room was changed and written back.
    Applied { room_id: DbId },
    /// The room already reflected the change; nothing was written.
    Unchanged { room_id: DbId },
    /// The referenced room does not exist; the link is dropped.
    RoomMissing { room_id: DbId },
}

/// Result of moving a student between rooms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reassignment {
    pub detach: RoomUpdate,
    pub attach: RoomUpdate,
}

impl Reassignment {
    const NOOP: Self = Self {
        detach: RoomUpdate::Skipped,
        attach: RoomUpdate::Skipped,
    };
}

/// Keeps room occupancy consistent with student room pointers.
pub struct RoomAssignmentCoordinator<L> {
    ledger: L,
}

impl<L: RoomLedger> RoomAssignmentCoordinator<L> {
    pub fn new(ledger: L) -> Self {
        Self { ledger }
    }

    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    /// Record a freshly persisted student in its requested room.
    pub async fn assign_on_create(
        &self,
        student_id: DbId,
        room_id: Option<DbId>,
    ) -> Result<RoomUpdate, CoreError> {
        match room_id {
            Some(room_id) => self.attach(student_id, room_id).await,
            None => Ok(RoomUpdate::Skipped),
        }
    }

    /// Move a student's membership after its `room_id` changed.
    ///
    /// Equal pointers (including both absent) touch nothing. Otherwise the
    /// old room is detached first, then the new room attached; a storage
    /// error in the first step aborts the second.
    pub async fn reassign_on_update(
        &self,
        student_id: DbId,
        old_room_id: Option<DbId>,
        new_room_id: Option<DbId>,
    ) -> Result<Reassignment, CoreError> {
        if old_room_id == new_room_id {
            return Ok(Reassignment::NOOP);
        }

        let detach = match old_room_id {
            Some(room_id) => self.detach(student_id, room_id).await?,
            None => RoomUpdate::Skipped,
        };
        let attach = match new_room_id {
            Some(room_id) => self.attach(student_id, room_id).await?,
            None => RoomUpdate::Skipped,
        };

        Ok(Reassignment { detach, attach })
    }

    /// Remove a student from its room ahead of deleting the student.
    pub async fn detach_on_delete(
        &self,
        student_id: DbId,
        room_id: Option<DbId>,
    ) -> Result<RoomUpdate, CoreError> {
        match room_id {
            Some(room_id) => self.detach(student_id, room_id).await,
            None => Ok(RoomUpdate::Skipped),
        }
    }

    /// Compare a room against the student pointers without changing it.
    pub async fn audit(&self, room_id: DbId) -> Result<RoomDrift, CoreError> {
        let room = self.load_existing(room_id).await?;
        let residents = self.ledger.residents(room_id).await?;
        let drift = room.audit(&residents);
        if !drift.is_clean() {
            tracing::warn!(
                room_id,
                unlisted = ?drift.unlisted,
                stale = ?drift.stale,
                duplicates = ?drift.duplicates,
                "Room occupancy has drifted from student assignments"
            );
        }
        Ok(drift)
    }

    /// Rebuild a room's occupancy from the student pointers.
    ///
    /// Returns the drift found before the repair and the repaired room.
    pub async fn reconcile(
        &self,
        room_id: DbId,
    ) -> Result<(RoomDrift, RoomMembership), CoreError> {
        let mut room = self.load_existing(room_id).await?;
        let residents = self.ledger.residents(room_id).await?;
        let drift = room.audit(&residents);
        if room.rebuild(&residents) {
            self.ledger.store(&room).await?;
            tracing::info!(room_id, occupants = room.occupants, "Room occupancy reconciled");
        }
        Ok((drift, room))
    }

    async fn attach(&self, student_id: DbId, room_id: DbId) -> Result<RoomUpdate, CoreError> {
        let Some(mut room) = self.ledger.load(room_id).await? else {
            tracing::warn!(student_id, room_id, "Assigned room does not exist; link not recorded");
            return Ok(RoomUpdate::RoomMissing { room_id });
        };
        if !room.attach(student_id) {
            return Ok(RoomUpdate::Unchanged { room_id });
        }
        self.ledger.store(&room).await?;
        tracing::debug!(student_id, room_id, occupants = room.occupants, "Student attached to room");
        Ok(RoomUpdate::Applied { room_id })
    }

    async fn detach(&self, student_id: DbId, room_id: DbId) -> Result<RoomUpdate, CoreError> {
        let Some(mut room) = self.ledger.load(room_id).await? else {
            tracing::warn!(student_id, room_id, "Previous room does not exist; nothing to detach");
            return Ok(RoomUpdate::RoomMissing { room_id });
        };
        if !room.detach(student_id) {
            return Ok(RoomUpdate::Unchanged { room_id });
        }
        self.ledger.store(&room).await?;
        tracing::debug!(student_id, room_id, occupants = room.occupants, "Student detached from room");
        Ok(RoomUpdate::Applied { room_id })
    }

    async fn load_existing(&self, room_id: DbId) -> Result<RoomMembership, CoreError> {
        self.ledger
            .load(room_id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "Room",
                id: room_id,
            })
    }
}
