//! Maintenance request model and DTOs.

use hostel_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A `maintenance_requests` row joined with the student's name and external id.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MaintenanceRequest {
    pub id: DbId,
    #[serde(rename = "student")]
    pub student_id: DbId,
    pub student_name: String,
    #[serde(rename = "student_id")]
    pub student_code: String,
    pub room_number: i32,
    pub problem_type: String,
    pub title: String,
    pub description: String,
    pub status: String,
    pub reported_at: Timestamp,
    pub resolved_at: Option<Timestamp>,
    pub resolved_by: Option<DbId>,
    pub resolution_notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Request body for reporting a problem; the student comes from the caller.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateMaintenanceRequest {
    #[validate(range(min = 1))]
    pub room_number: i32,
    pub problem_type: String,
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(min = 1))]
    pub description: String,
}

/// DTO for an admin update. All fields are optional.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateMaintenanceRequest {
    pub status: Option<String>,
    pub resolution_notes: Option<String>,
}
