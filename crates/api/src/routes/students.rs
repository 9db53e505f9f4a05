//! Route definitions for the `/students` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::students;
use crate::state::AppState;

/// Routes mounted at `/students`.
///
/// ```text
/// GET    /                      -> list
/// POST   /                      -> create (admin)
/// GET    /me                    -> me
/// PUT    /me                    -> update_me
/// GET    /by-student-id/{code}  -> get_by_code
/// GET    /room/{room_id}        -> list_by_room
/// GET    /{id}                  -> get_by_id
/// PUT    /{id}                  -> update (admin)
/// DELETE /{id}                  -> delete (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(students::list).post(students::create))
        .route("/me", get(students::me).put(students::update_me))
        .route("/by-student-id/{code}", get(students::get_by_code))
        .route("/room/{room_id}", get(students::list_by_room))
        .route(
            "/{id}",
            get(students::get_by_id)
                .put(students::update)
                .delete(students::delete),
        )
}
