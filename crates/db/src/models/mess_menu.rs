//! Mess menu model and DTOs.

use hostel_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `mess_menus` table. `day` is a lowercase weekday.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MessMenu {
    pub id: DbId,
    pub day: String,
    pub breakfast: String,
    pub lunch: String,
    pub dinner: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Request body for creating or replacing a day's menu.
#[derive(Debug, Deserialize, Validate)]
pub struct UpsertMessMenu {
    pub day: String,
    #[validate(length(min = 1))]
    pub breakfast: String,
    #[validate(length(min = 1))]
    pub lunch: String,
    #[validate(length(min = 1))]
    pub dinner: String,
}

/// DTO for editing a day's menu. All fields are optional.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateMessMenu {
    #[validate(length(min = 1))]
    pub breakfast: Option<String>,
    #[validate(length(min = 1))]
    pub lunch: Option<String>,
    #[validate(length(min = 1))]
    pub dinner: Option<String>,
}
