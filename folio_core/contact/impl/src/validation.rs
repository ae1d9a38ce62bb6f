use std::sync::LazyLock;

use folio_models::contact::{ValidationError, ValidationResult, MIN_MESSAGE_LENGTH};
use regex::Regex;

pub static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

/// Checks the raw contact form fields. The first failing rule wins:
/// presence of both fields, then the shape of the email address, then the
/// length of the trimmed message, counted in UTF-16 code units like a
/// browser's `String.length`.
pub fn validate(email: &str, message: &str) -> ValidationResult {
    if email.is_empty() || message.is_empty() {
        return Err(ValidationError::MissingFields);
    }

    if !EMAIL_REGEX.is_match(email) {
        return Err(ValidationError::InvalidEmail);
    }

    if message.trim().encode_utf16().count() < MIN_MESSAGE_LENGTH {
        return Err(ValidationError::MessageTooShort);
    }

    Ok(())
}
