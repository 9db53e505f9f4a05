pub mod attendance;
pub mod auth;
pub mod health;
pub mod rooms;
pub mod students;
pub mod tickets;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                                      login (public)
/// /auth/register                                   register (admin only)
///
/// /users/me                                        get, update own account
/// /users/change-password                           change own password (POST)
///
/// /students                                        list, create (create: admin)
/// /students/me                                     own profile, self update
/// /students/by-student-id/{code}                   lookup by external id
/// /students/room/{room_id}                         residents of a room
/// /students/{id}                                   get, update, delete (writes: admin)
///
/// /rooms                                           list, create (create: admin)
/// /rooms/number/{room_number}                      lookup by room number
/// /rooms/{id}                                      get, update, delete (writes: admin)
/// /rooms/{id}/drift                                occupancy audit (admin)
/// /rooms/{id}/reconcile                            occupancy repair (admin, POST)
///
/// /attendance                                      list, mark
/// /attendance/bulk                                 mark many (POST)
/// /attendance/student/{code}                       one student's records
/// /attendance/student/{code}/stats                 one student's totals
/// /attendance/{id}                                 update, delete
///
/// /leaves                                          list, apply
/// /leaves/student/{code}                           one student's leaves
/// /leaves/{id}                                     get, review, delete (writes: admin)
///
/// /complaints                                      list, file
/// /complaints/student/{code}                       one student's complaints
/// /complaints/{id}                                 get, update, delete (writes: admin)
///
/// /maintenance                                     list, report
/// /maintenance/student/{code}                      one student's requests
/// /maintenance/{id}                                get, update, delete (writes: admin)
///
/// /fees                                            list, create (create: admin)
/// /fees/student/{code}                             one student's fees
/// /fees/{id}                                       get, update, delete (writes: admin)
///
/// /mess-menu                                       weekly menu, upsert a day (upsert: admin)
/// /mess-menu/{day}                                 get, update, delete (writes: admin)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/users", users::router())
        .nest("/students", students::router())
        .nest("/rooms", rooms::router())
        .nest("/attendance", attendance::router())
        .nest("/leaves", tickets::leaves_router())
        .nest("/complaints", tickets::complaints_router())
        .nest("/maintenance", tickets::maintenance_router())
        .nest("/fees", tickets::fees_router())
        .nest("/mess-menu", tickets::mess_menu_router())
}
