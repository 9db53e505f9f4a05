//! Route definitions for the caller's own account.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

/// Routes mounted at `/users`.
///
/// ```text
/// GET  /me               -> me
/// PUT  /me               -> update_me
/// POST /change-password  -> change_password
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/me", get(users::me).put(users::update_me))
        .route("/change-password", post(users::change_password))
}
