//! Route definitions for the `/users` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

/// Routes mounted at `/users`.
///
/// ```text
/// GET  /                  -> list_users
/// POST /create            -> create_user
/// POST /get-info          -> verify_login
/// GET  /{id}              -> get_user
/// PUT  /{id}              -> update_user
/// GET  /{id}/strategies   -> list_user_strategies
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(users::list_users))
        .route("/create", post(users::create_user))
        .route("/get-info", post(users::verify_login))
        .route("/{id}", get(users::get_user).put(users::update_user))
        .route("/{id}/strategies", get(users::list_user_strategies))
}
