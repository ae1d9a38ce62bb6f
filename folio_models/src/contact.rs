use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The field values of the contact form at the moment it was submitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactSubmission {
    pub email: String,
    pub message: String,
}

impl ContactSubmission {
    pub fn new(email: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            message: message.into(),
        }
    }
}

/// Outcome of validating a [`ContactSubmission`].
pub type ValidationResult = Result<(), ValidationError>;

/// Reasons a contact form is rejected before anything is sent.
///
/// The `Display` output is shown to the user verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please fill in all fields")]
    MissingFields,
    #[error("Please enter a valid email address")]
    InvalidEmail,
    #[error("Message must be at least {} characters long", MIN_MESSAGE_LENGTH)]
    MessageTooShort,
}

/// Minimum length of the trimmed message in UTF-16 code units.
pub const MIN_MESSAGE_LENGTH: usize = 10;
