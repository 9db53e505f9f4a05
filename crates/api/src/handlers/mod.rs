pub mod attendance;
pub mod auth;
pub mod complaints;
pub mod fees;
pub mod leaves;
pub mod maintenance;
pub mod mess_menu;
pub mod rooms;
pub mod students;
pub mod users;

use hostel_core::error::CoreError;
use hostel_db::models::student::Student;
use hostel_db::repositories::StudentRepo;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Resolve an external student id, or 404.
pub(crate) async fn student_by_code(state: &AppState, code: &str) -> AppResult<Student> {
    StudentRepo::find_by_code(&state.pool, code)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFoundByKey {
                entity: "Student",
                key: code.to_string(),
            })
        })
}

/// The student profile linked to a login, or 404.
pub(crate) async fn student_for_user(state: &AppState, user_id: i64) -> AppResult<Student> {
    StudentRepo::find_by_user_id(&state.pool, user_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFoundByKey {
                entity: "Student profile for user",
                key: user_id.to_string(),
            })
        })
}
