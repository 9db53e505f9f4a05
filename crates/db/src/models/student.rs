//! Student entity model and DTOs.

use hostel_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `students` table.
///
/// `student_code` is the external identifier (serialized as `student_id`);
/// `room_id` is the authoritative room link.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Student {
    pub id: DbId,
    #[serde(rename = "student_id")]
    pub student_code: String,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub room_id: Option<DbId>,
    pub user_id: DbId,
    pub photo_url: Option<String>,
    pub guardian_name: Option<String>,
    pub address: Option<String>,
    pub year: Option<String>,
    pub branch: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A student joined with a summary of its room.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct StudentWithRoom {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub student: Student,
    pub room_number: Option<i32>,
    pub room_block: Option<String>,
    pub room_floor: Option<i32>,
}

/// DTO for inserting a student. `user_id` comes from the paired credential.
#[derive(Debug)]
pub struct CreateStudent {
    pub student_code: String,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub room_id: Option<DbId>,
    pub user_id: DbId,
    pub photo_url: Option<String>,
    pub guardian_name: Option<String>,
    pub address: Option<String>,
    pub year: Option<String>,
    pub branch: Option<String>,
}

/// DTO for an administrative student update. All fields are optional.
///
/// `room_id` separates "leave the room alone" (absent) from "unassign"
/// (explicit `null`).
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateStudent {
    #[validate(length(min = 1, max = 50))]
    #[serde(rename = "student_id")]
    pub student_code: Option<String>,
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(max = 30))]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "crate::serde_ext::double_option")]
    pub room_id: Option<Option<DbId>>,
    pub photo_url: Option<String>,
    pub guardian_name: Option<String>,
    pub address: Option<String>,
    pub year: Option<String>,
    pub branch: Option<String>,
}

impl UpdateStudent {
    /// Whether the update touches the room link at all.
    pub fn changes_room(&self) -> bool {
        self.room_id.is_some()
    }
}

/// Self-service profile update. Unknown keys, including `room_id`, are
/// dropped during deserialization.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateOwnProfile {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(max = 30))]
    pub phone: Option<String>,
    pub guardian_name: Option<String>,
    pub address: Option<String>,
    pub photo_url: Option<String>,
    pub year: Option<String>,
    pub branch: Option<String>,
}

impl From<UpdateOwnProfile> for UpdateStudent {
    fn from(input: UpdateOwnProfile) -> Self {
        Self {
            student_code: None,
            name: input.name,
            email: input.email,
            phone: input.phone,
            room_id: None,
            photo_url: input.photo_url,
            guardian_name: input.guardian_name,
            address: input.address,
            year: input.year,
            branch: input.branch,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_room_id_leaves_room_untouched() {
        let update: UpdateStudent = parse(r#"{"name": "Asha"}"#);
        assert_eq!(update.room_id, None);
        assert!(!update.changes_room());
    }

    #[test]
    fn null_room_id_means_unassign() {
        let update: UpdateStudent = parse(r#"{"room_id": null}"#);
        assert_eq!(update.room_id, Some(None));
    }

    #[test]
    fn numeric_room_id_means_assign() {
        let update: UpdateStudent = parse(r#"{"room_id": 7}"#);
        assert_eq!(update.room_id, Some(Some(7)));
    }

    #[test]
    fn own_profile_never_carries_a_room() {
        let own: UpdateOwnProfile = parse(r#"{"phone": "555", "room_id": 3}"#);
        let update = UpdateStudent::from(own);
        assert_eq!(update.phone.as_deref(), Some("555"));
        assert!(!update.changes_room());
    }

    fn parse<T: serde::de::DeserializeOwned>(json: &str) -> T {
        serde_json::from_str(json).unwrap()
    }
}
