//! SMTP delivery via `lettre`.
//!
//! Configuration is loaded from environment variables; if `SMTP_HOST` is not
//! set, [`SmtpConfig::from_env`] returns `None` and no sender is built.

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use strategist_core::contact::ContactMessage;

use crate::{ContactSender, MailError};

// ---------------------------------------------------------------------------
// SmtpConfig
// ---------------------------------------------------------------------------

/// Default SMTP port (STARTTLS).
const DEFAULT_SMTP_PORT: u16 = 587;

/// Default sender address when `SMTP_FROM` is not set.
const DEFAULT_FROM_ADDRESS: &str = "noreply@strategist.local";

/// Configuration for the SMTP contact relay.
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    /// SMTP server hostname.
    pub smtp_host: String,
    /// SMTP server port (defaults to 587).
    pub smtp_port: u16,
    /// RFC 5322 "From" address.
    pub from_address: String,
    /// Inbox that receives contact messages (defaults to `from_address`).
    pub contact_recipient: String,
    /// Optional SMTP username.
    pub smtp_user: Option<String>,
    /// Optional SMTP password.
    pub smtp_password: Option<String>,
}

impl SmtpConfig {
    /// Load configuration from environment variables.
    ///
    /// Returns `None` if `SMTP_HOST` is not set, signalling that email
    /// delivery is not configured.
    ///
    /// | Variable            | Required | Default                     |
    /// |---------------------|----------|-----------------------------|
    /// | `SMTP_HOST`         | yes      | -                           |
    /// | `SMTP_PORT`         | no       | `587`                       |
    /// | `SMTP_FROM`         | no       | `noreply@strategist.local`  |
    /// | `CONTACT_RECIPIENT` | no       | value of `SMTP_FROM`        |
    /// | `SMTP_USER`         | no       | -                           |
    /// | `SMTP_PASSWORD`     | no       | -                           |
    pub fn from_env() -> Option<Self> {
        let smtp_host = std::env::var("SMTP_HOST").ok()?;
        let from_address =
            std::env::var("SMTP_FROM").unwrap_or_else(|_| DEFAULT_FROM_ADDRESS.to_string());
        Some(Self {
            smtp_host,
            smtp_port: std::env::var("SMTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_SMTP_PORT),
            contact_recipient: std::env::var("CONTACT_RECIPIENT")
                .unwrap_or_else(|_| from_address.clone()),
            from_address,
            smtp_user: std::env::var("SMTP_USER").ok(),
            smtp_password: std::env::var("SMTP_PASSWORD").ok(),
        })
    }
}

// ---------------------------------------------------------------------------
// Message assembly
// ---------------------------------------------------------------------------

/// Build the email relayed to the inbox. Replies go to the submitter.
pub fn build_contact_email(
    config: &SmtpConfig,
    message: &ContactMessage,
) -> Result<Message, MailError> {
    let reply_to = Mailbox::new(Some(message.name.clone()), message.email.parse()?);

    Message::builder()
        .from(config.from_address.parse()?)
        .reply_to(reply_to)
        .to(config.contact_recipient.parse()?)
        .subject(message.subject_line())
        .header(ContentType::TEXT_PLAIN)
        .body(message.body_text())
        .map_err(|e| MailError::Build(e.to_string()))
}

// ---------------------------------------------------------------------------
// SmtpContactSender
// ---------------------------------------------------------------------------

/// Sends contact messages over SMTP.
pub struct SmtpContactSender {
    config: SmtpConfig,
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpContactSender {
    /// Build the sender and its (lazily connecting) SMTP transport.
    pub fn new(config: SmtpConfig) -> Result<Self, MailError> {
        let mut transport_builder =
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)?
                .port(config.smtp_port);

        if let (Some(user), Some(pass)) = (&config.smtp_user, &config.smtp_password) {
            transport_builder =
                transport_builder.credentials(Credentials::new(user.clone(), pass.clone()));
        }

        Ok(Self {
            transport: transport_builder.build(),
            config,
        })
    }
}

#[async_trait]
impl ContactSender for SmtpContactSender {
    async fn send_contact(&self, message: &ContactMessage) -> Result<(), MailError> {
        let email = build_contact_email(&self.config, message)?;
        self.transport.send(email).await?;

        tracing::info!(
            to = %self.config.contact_recipient,
            reply_to = %message.email,
            "Contact email sent"
        );
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
