use std::future::Future;

use folio_models::contact::ValidationError;
use thiserror::Error;
use tokio::sync::watch;

/// State machine behind the contact form.
///
/// The form starts [`Idle`](SubmissionState::Idle). Submitting validates the
/// current field values and, if they are valid and the delivery service is
/// configured, sends them. While a message is being sent the form is
/// disabled: field edits and further submits are ignored.
pub trait ContactFormService: Send + Sync + 'static {
    /// Returns a snapshot of the current form state.
    fn view(&self) -> ContactFormView;

    /// Returns a receiver that is notified on every state change.
    fn subscribe(&self) -> watch::Receiver<ContactFormView>;

    /// Updates the email field. Returns `false` if the form is disabled.
    fn set_email(&self, email: String) -> bool;

    /// Updates the message field. Returns `false` if the form is disabled.
    fn set_message(&self, message: String) -> bool;

    /// Runs one submission attempt with the current field values.
    ///
    /// Never fails: every error ends up as [`SubmissionState::Failure`] and
    /// is reported through the returned [`SubmitOutcome`].
    fn submit(&self) -> impl Future<Output = SubmitOutcome> + Send;
}

/// Everything the presentation layer needs to render the contact form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactFormView {
    pub email: String,
    pub message: String,
    pub state: SubmissionState,
    /// Number of submission attempts started so far, ignored submits excluded.
    pub attempt: u64,
}

impl ContactFormView {
    /// Inputs and the submit button are disabled while this is `true`.
    pub fn is_submitting(&self) -> bool {
        self.state == SubmissionState::Submitting
    }

    pub fn show_success(&self) -> bool {
        self.state == SubmissionState::Success
    }

    pub fn failure(&self) -> Option<SubmissionFailure> {
        match self.state {
            SubmissionState::Failure(failure) => Some(failure),
            _ => None,
        }
    }

    /// Text of the error banner, if one should be shown.
    pub fn error_message(&self) -> Option<String> {
        self.failure().map(|failure| failure.to_string())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SubmissionState {
    #[default]
    Idle,
    Submitting,
    Success,
    Failure(SubmissionFailure),
}

/// Why a submission attempt failed. The `Display` output is the text shown
/// to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SubmissionFailure {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Email service is not configured. Please contact the administrator.")]
    NotConfigured,
    #[error("Failed to send message. Please try again or contact me directly.")]
    Delivery,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// A message was already being sent, nothing happened.
    Ignored,
    /// The delivery service accepted the message.
    Sent,
    Failed(SubmissionFailure),
}
