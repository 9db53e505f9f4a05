//! Leave application model and DTOs.

use hostel_core::types::{CalendarDate, DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A `leaves` row joined with the student's name and external id.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Leave {
    pub id: DbId,
    #[serde(rename = "student")]
    pub student_id: DbId,
    pub student_name: String,
    #[serde(rename = "student_id")]
    pub student_code: String,
    pub name: String,
    pub hostel_no: String,
    pub leave_type: String,
    pub visit_place: String,
    pub start_date: CalendarDate,
    pub start_time: String,
    pub end_date: CalendarDate,
    pub end_time: String,
    pub reason: String,
    pub mobile: String,
    pub days: i32,
    pub status: String,
    pub applied_on: Timestamp,
    pub reviewed_by: Option<DbId>,
    pub reviewed_at: Option<Timestamp>,
    pub review_notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for inserting a leave for an already resolved student.
#[derive(Debug)]
pub struct CreateLeave {
    pub student_id: DbId,
    pub name: String,
    pub hostel_no: String,
    pub leave_type: String,
    pub visit_place: String,
    pub start_date: CalendarDate,
    pub start_time: String,
    pub end_date: CalendarDate,
    pub end_time: String,
    pub reason: String,
    pub mobile: String,
    pub days: i32,
}

/// Review decision recorded by an admin.
#[derive(Debug, Default, Deserialize)]
pub struct ReviewLeave {
    pub status: Option<String>,
    pub review_notes: Option<String>,
}
