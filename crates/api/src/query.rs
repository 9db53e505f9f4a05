//! Shared query parameter types for API handlers.

use hostel_core::types::CalendarDate;
use serde::Deserialize;

/// Optional `?status=` filter accepted by every ticket list endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct StatusFilter {
    pub status: Option<String>,
}

/// Inclusive date range (`?start_date=&end_date=`).
#[derive(Debug, Default, Deserialize)]
pub struct DateRange {
    pub start_date: Option<CalendarDate>,
    pub end_date: Option<CalendarDate>,
}

/// Filters for `GET /attendance`.
///
/// `student_id` is the external student id.
#[derive(Debug, Default, Deserialize)]
pub struct AttendanceQuery {
    pub student_id: Option<String>,
    pub status: Option<String>,
    pub start_date: Option<CalendarDate>,
    pub end_date: Option<CalendarDate>,
}
