//! Route definitions for the ticket collections and the mess menu.
//!
//! Leaves, complaints, maintenance requests and fees share one shape: a
//! list with a `?status=` filter, a per-student list keyed by external id,
//! and admin-only writes on single records.

use axum::routing::get;
use axum::Router;

use crate::handlers::{complaints, fees, leaves, maintenance, mess_menu};
use crate::state::AppState;

/// Routes mounted at `/leaves`.
///
/// ```text
/// GET    /                -> list
/// POST   /                -> apply
/// GET    /student/{code}  -> list_for_student
/// GET    /{id}            -> get_by_id
/// PUT    /{id}            -> review (admin)
/// DELETE /{id}            -> delete (admin)
/// ```
pub fn leaves_router() -> Router<AppState> {
    Router::new()
        .route("/", get(leaves::list).post(leaves::apply))
        .route("/student/{code}", get(leaves::list_for_student))
        .route(
            "/{id}",
            get(leaves::get_by_id)
                .put(leaves::review)
                .delete(leaves::delete),
        )
}

/// Routes mounted at `/complaints`.
///
/// ```text
/// GET    /                -> list
/// POST   /                -> create
/// GET    /student/{code}  -> list_for_student
/// GET    /{id}            -> get_by_id
/// PUT    /{id}            -> update (admin)
/// DELETE /{id}            -> delete (admin)
/// ```
pub fn complaints_router() -> Router<AppState> {
    Router::new()
        .route("/", get(complaints::list).post(complaints::create))
        .route("/student/{code}", get(complaints::list_for_student))
        .route(
            "/{id}",
            get(complaints::get_by_id)
                .put(complaints::update)
                .delete(complaints::delete),
        )
}

/// Routes mounted at `/maintenance`.
///
/// ```text
/// GET    /                -> list
/// POST   /                -> create
/// GET    /student/{code}  -> list_for_student
/// GET    /{id}            -> get_by_id
/// PUT    /{id}            -> update (admin)
/// DELETE /{id}            -> delete (admin)
/// ```
pub fn maintenance_router() -> Router<AppState> {
    Router::new()
        .route("/", get(maintenance::list).post(maintenance::create))
        .route("/student/{code}", get(maintenance::list_for_student))
        .route(
            "/{id}",
            get(maintenance::get_by_id)
                .put(maintenance::update)
                .delete(maintenance::delete),
        )
}

/// Routes mounted at `/fees`.
///
/// ```text
/// GET    /                -> list
/// POST   /                -> create (admin)
/// GET    /student/{code}  -> list_for_student
/// GET    /{id}            -> get_by_id
/// PUT    /{id}            -> update (admin)
/// DELETE /{id}            -> delete (admin)
/// ```
pub fn fees_router() -> Router<AppState> {
    Router::new()
        .route("/", get(fees::list).post(fees::create))
        .route("/student/{code}", get(fees::list_for_student))
        .route(
            "/{id}",
            get(fees::get_by_id).put(fees::update).delete(fees::delete),
        )
}

/// Routes mounted at `/mess-menu`.
///
/// ```text
/// GET    /       -> list (Monday first)
/// POST   /       -> upsert (admin)
/// GET    /{day}  -> get_by_day
/// PUT    /{day}  -> update (admin)
/// DELETE /{day}  -> delete (admin)
/// ```
pub fn mess_menu_router() -> Router<AppState> {
    Router::new()
        .route("/", get(mess_menu::list).post(mess_menu::upsert))
        .route(
            "/{day}",
            get(mess_menu::get_by_day)
                .put(mess_menu::update)
                .delete(mess_menu::delete),
        )
}
