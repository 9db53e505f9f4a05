//! Attendance record model and DTOs.

use hostel_core::types::{CalendarDate, DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// An attendance row joined with the student's name and external id.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AttendanceRecord {
    pub id: DbId,
    #[serde(rename = "student")]
    pub student_id: DbId,
    pub student_name: String,
    #[serde(rename = "student_id")]
    pub student_code: String,
    pub date: CalendarDate,
    pub status: String,
    pub marked_by: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Filters for listing attendance. Every field narrows the result.
#[derive(Debug, Default, Clone)]
pub struct AttendanceFilter {
    pub student_code: Option<String>,
    pub status: Option<String>,
    pub start_date: Option<CalendarDate>,
    pub end_date: Option<CalendarDate>,
}

/// DTO for correcting an existing record.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateAttendance {
    pub date: Option<CalendarDate>,
    pub status: Option<String>,
}
