//! Route definitions for the `/strategies` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::strategies;
use crate::state::AppState;

/// Routes mounted at `/strategies`.
///
/// ```text
/// POST /                  -> create_strategy
/// GET  /{id}              -> get_strategy
/// GET  /{id}/download     -> download_strategy
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(strategies::create_strategy))
        .route("/{id}", get(strategies::get_strategy))
        .route("/{id}/download", get(strategies::download_strategy))
}
