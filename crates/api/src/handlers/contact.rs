//! Handler for `POST /contact`: relay the public contact form by email.

use axum::extract::State;
use axum::Json;
use serde::Serialize;
use strategist_core::contact::ContactMessage;

use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::response::DataResponse;
use crate::state::AppState;

/// Payload returned after a message has been handed to the mail server.
#[derive(Debug, Serialize)]
pub struct ContactSent {
    pub sent: bool,
}

/// POST /api/contact
///
/// Validate the message, then hand it to the configured [`ContactSender`].
/// Answers 503 when no mail transport is configured.
///
/// [`ContactSender`]: strategist_mailer::ContactSender
pub async fn send_contact(
    State(state): State<AppState>,
    AppJson(input): AppJson<ContactMessage>,
) -> AppResult<Json<DataResponse<ContactSent>>> {
    let message = input.normalized()?;

    let sender = state.contact_sender.as_ref().ok_or_else(|| {
        AppError::ServiceUnavailable("Contact email is not configured".into())
    })?;

    sender.send_contact(&message).await?;

    tracing::info!(from = %message.email, "Contact message relayed");

    Ok(Json(DataResponse::new(ContactSent { sent: true })))
}
