use axum::routing::post;
use axum::Router;

use crate::handlers::contact;
use crate::state::AppState;

/// `POST /contact -> send_contact`
pub fn router() -> Router<AppState> {
    Router::new().route("/contact", post(contact::send_contact))
}
