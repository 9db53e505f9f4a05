//! Complaint model and DTOs.

use hostel_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A `complaints` row joined with the student's name and external id.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Complaint {
    pub id: DbId,
    #[serde(rename = "student")]
    pub student_id: DbId,
    pub student_name: String,
    #[serde(rename = "student_id")]
    pub student_code: String,
    pub title: String,
    pub category: String,
    pub description: String,
    pub status: String,
    pub submitted_at: Timestamp,
    pub resolved_at: Option<Timestamp>,
    pub resolution_message: Option<String>,
    pub resolved_by: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Request body for filing a complaint; the student comes from the caller.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateComplaint {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    pub category: String,
    #[validate(length(min = 1))]
    pub description: String,
}

/// DTO for an admin update. All fields are optional.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateComplaint {
    pub status: Option<String>,
    pub resolution_message: Option<String>,
}
