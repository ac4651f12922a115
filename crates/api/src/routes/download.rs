use axum::routing::post;
use axum::Router;

use crate::handlers::download;
use crate::state::AppState;

/// `POST /download -> download`
pub fn router() -> Router<AppState> {
    Router::new().route("/download", post(download::download))
}
