//! Route definitions for the `/rooms` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::rooms;
use crate::state::AppState;

/// Routes mounted at `/rooms`.
///
/// ```text
/// GET    /                      -> list
/// POST   /                      -> create (admin)
/// GET    /number/{room_number}  -> get_by_number
/// GET    /{id}                  -> get_by_id
/// PUT    /{id}                  -> update (admin)
/// DELETE /{id}                  -> delete (admin)
/// GET    /{id}/drift            -> drift (admin)
/// POST   /{id}/reconcile        -> reconcile (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(rooms::list).post(rooms::create))
        .route("/number/{room_number}", get(rooms::get_by_number))
        .route(
            "/{id}",
            get(rooms::get_by_id)
                .put(rooms::update)
                .delete(rooms::delete),
        )
        .route("/{id}/drift", get(rooms::drift))
        .route("/{id}/reconcile", post(rooms::reconcile))
}
