//! Contact form message and its validation rules.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::CoreError;

/// Maximum length of the message body (characters).
pub const MAX_MESSAGE_LENGTH: u64 = 5_000;

/// Maximum length of the sender name and subject (characters).
pub const MAX_SHORT_FIELD_LENGTH: u64 = 200;

/// Subject used when the sender leaves it empty.
pub const DEFAULT_SUBJECT: &str = "New contact form submission";

/// A message submitted through the public contact form.
///
/// Missing fields deserialize as empty strings so they fail validation
/// instead of deserialization.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ContactMessage {
    #[serde(default)]
    #[validate(length(min = 1, max = MAX_SHORT_FIELD_LENGTH))]
    pub name: String,
    #[serde(default)]
    #[validate(email)]
    pub email: String,
    #[validate(length(max = MAX_SHORT_FIELD_LENGTH))]
    pub subject: Option<String>,
    #[serde(default)]
    #[validate(length(min = 1, max = MAX_MESSAGE_LENGTH))]
    pub message: String,
}

impl ContactMessage {
    /// Trim every field and run the validation rules.
    pub fn normalized(self) -> Result<Self, CoreError> {
        let msg = Self {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            subject: self
                .subject
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            message: self.message.trim().to_string(),
        };
        msg.validate()?;
        Ok(msg)
    }

    /// Subject line for the relayed email.
    pub fn subject_line(&self) -> String {
        match &self.subject {
            Some(subject) => format!("[Contact] {subject}"),
            None => format!("[Contact] {DEFAULT_SUBJECT}"),
        }
    }

    /// Plain-text body for the relayed email.
    pub fn body_text(&self) -> String {
        format!(
            "Name: {}\nEmail: {}\n\n{}",
            self.name, self.email, self.message
        )
    }
}
