//! Outbound email for the public contact form.
//!
//! Handlers depend on the [`ContactSender`] trait; [`smtp::SmtpContactSender`]
//! is the production implementation over `lettre`'s async SMTP transport.

pub mod smtp;

use async_trait::async_trait;
use strategist_core::contact::ContactMessage;

pub use smtp::{SmtpConfig, SmtpContactSender};

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Error type for email delivery failures.
#[derive(Debug, thiserror::Error)]
pub enum MailError {
    /// SMTP transport-level failure (authentication, connection, etc.).
    #[error("SMTP transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),

    /// The recipient or sender address could not be parsed.
    #[error("Email address parse error: {0}")]
    Address(#[from] lettre::address::AddressError),

    /// The MIME message could not be assembled.
    #[error("Email build error: {0}")]
    Build(String),
}

// ---------------------------------------------------------------------------
// Sender seam
// ---------------------------------------------------------------------------

/// Delivers a validated contact message to the site's inbox.
#[async_trait]
pub trait ContactSender: Send + Sync {
    async fn send_contact(&self, message: &ContactMessage) -> Result<(), MailError>;
}
