//! User account rules: normalisation, identity shape, identity matching.

use validator::ValidateEmail;

use crate::error::CoreError;
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Login count stored on a freshly created account.
pub const INITIAL_LOGIN_COUNT: i32 = 1;

/// Maximum length of a username (characters).
pub const MAX_USERNAME_LENGTH: usize = 64;

/// Maximum length of first / last names (characters).
pub const MAX_NAME_LENGTH: usize = 100;

// ---------------------------------------------------------------------------
// Identity
// ---------------------------------------------------------------------------

/// Trim and lowercase an email address.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Validate the shape of a new account's identity fields.
///
/// Expects values that already passed
/// [`require_fields`](crate::validation::require_fields).
pub fn validate_identity(
    email: &str,
    username: &str,
    first_name: &str,
    last_name: &str,
) -> Result<(), CoreError> {
    if !email.validate_email() {
        return Err(CoreError::Validation(format!(
            "'{email}' is not a valid email address"
        )));
    }
    if username.chars().count() > MAX_USERNAME_LENGTH {
        return Err(CoreError::Validation(format!(
            "Username exceeds maximum length of {MAX_USERNAME_LENGTH} characters"
        )));
    }
    if username.chars().any(char::is_whitespace) {
        return Err(CoreError::Validation(
            "Username must not contain whitespace".into(),
        ));
    }
    for (label, value) in [("First name", first_name), ("Last name", last_name)] {
        if value.chars().count() > MAX_NAME_LENGTH {
            return Err(CoreError::Validation(format!(
                "{label} exceeds maximum length of {MAX_NAME_LENGTH} characters"
            )));
        }
    }
    Ok(())
}

/// Check that the accounts found by username and by email are the same row.
pub fn ensure_same_account(by_username: DbId, by_email: DbId) -> Result<(), CoreError> {
    if by_username == by_email {
        Ok(())
    } else {
        Err(CoreError::Unauthorized(
            "Username and email do not match the same account".into(),
        ))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
