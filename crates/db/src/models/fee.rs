//! Fee model and DTOs.

use hostel_core::types::{CalendarDate, DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A `fees` row joined with the student's name and external id.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Fee {
    pub id: DbId,
    #[serde(rename = "student")]
    pub student_id: DbId,
    pub student_name: String,
    #[serde(rename = "student_id")]
    pub student_code: String,
    pub amount: f64,
    pub due_date: CalendarDate,
    pub status: String,
    pub paid_date: Option<CalendarDate>,
    pub payment_method: Option<String>,
    pub transaction_id: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for inserting a fee for an already resolved student.
#[derive(Debug)]
pub struct CreateFee {
    pub student_id: DbId,
    pub amount: f64,
    pub due_date: CalendarDate,
    pub status: String,
    pub paid_date: Option<CalendarDate>,
    pub payment_method: Option<String>,
    pub transaction_id: Option<String>,
}

/// DTO for updating a fee. All fields are optional.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateFee {
    #[validate(range(min = 0.0))]
    pub amount: Option<f64>,
    pub due_date: Option<CalendarDate>,
    pub status: Option<String>,
    pub paid_date: Option<CalendarDate>,
    pub payment_method: Option<String>,
    pub transaction_id: Option<String>,
}
