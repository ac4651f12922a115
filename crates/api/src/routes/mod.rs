pub mod contact;
pub mod download;
pub mod health;
pub mod strategies;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /users                          list users (GET)
/// /users/create                   create user (POST)
/// /users/get-info                 verify login + bump login count (POST)
/// /users/{id}                     get, update (GET, PUT)
/// /users/{id}/strategies          stored strategies for a user (GET)
///
/// /strategies                     store a generated strategy (POST)
/// /strategies/{id}                get with artifacts (GET)
/// /strategies/{id}/download       export a stored strategy (GET, ?format=)
///
/// /contact                        relay contact form by email (POST)
/// /download                       export an ad-hoc payload (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/users", users::router())
        .nest("/strategies", strategies::router())
        .merge(contact::router())
        .merge(download::router())
}
