//! Route definitions for the `/attendance` resource.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::attendance;
use crate::state::AppState;

/// Routes mounted at `/attendance`.
///
/// ```text
/// GET    /                       -> list
/// POST   /                       -> mark (201 created, 200 overwritten)
/// POST   /bulk                   -> mark_many
/// GET    /student/{code}         -> list_for_student
/// GET    /student/{code}/stats   -> stats_for_student
/// PUT    /{id}                   -> update
/// DELETE /{id}                   -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(attendance::list).post(attendance::mark))
        .route("/bulk", post(attendance::mark_many))
        .route("/student/{code}", get(attendance::list_for_student))
        .route("/student/{code}/stats", get(attendance::stats_for_student))
        .route("/{id}", put(attendance::update).delete(attendance::delete))
}
