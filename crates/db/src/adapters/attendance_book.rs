use async_trait::async_trait;
use hostel_core::attendance::{AttendanceBook, AttendanceStatus, NewMark};
use hostel_core::error::CoreError;
use hostel_core::types::{CalendarDate, DbId};
use sqlx::PgPool;

use super::into_core;
use crate::models::attendance::AttendanceRecord;
use crate::repositories::{AttendanceRepo, StudentRepo};

/// Attendance marks stored in `attendance_records`, whose
/// `uq_attendance_student_date` constraint backs the one-per-day rule.
#[derive(Clone)]
pub struct PgAttendanceBook {
    pool: PgPool,
}

impl PgAttendanceBook {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AttendanceBook for PgAttendanceBook {
    type Record = AttendanceRecord;

    async fn resolve_student(&self, student_code: &str) -> Result<Option<DbId>, CoreError> {
        let student = StudentRepo::find_by_code(&self.pool, student_code)
            .await
            .map_err(into_core)?;
        Ok(student.map(|s| s.id))
    }

    async fn find_mark(
        &self,
        student_id: DbId,
        date: CalendarDate,
    ) -> Result<Option<DbId>, CoreError> {
        AttendanceRepo::find_id_for(&self.pool, student_id, date)
            .await
            .map_err(into_core)
    }

    async fn insert_mark(&self, mark: &NewMark) -> Result<AttendanceRecord, CoreError> {
        AttendanceRepo::insert(&self.pool, mark)
            .await
            .map_err(into_core)
    }

    async fn overwrite_mark(
        &self,
        id: DbId,
        status: AttendanceStatus,
        marked_by: Option<DbId>,
    ) -> Result<AttendanceRecord, CoreError> {
        AttendanceRepo::overwrite(&self.pool, id, status.as_str(), marked_by)
            .await
            .map_err(into_core)?
            .ok_or(CoreError::NotFound {
                entity: "Attendance",
                id,
            })
    }
}
