use std::{sync::Arc, time::Duration};

use folio_core_contact_contracts::{
    ContactFormService, ContactFormView, SubmissionFailure, SubmissionState, SubmitOutcome,
};
use folio_email_contracts::EmailDeliveryService;
use folio_models::{contact::ContactSubmission, delivery::DeliveryCredentials};
use tokio::sync::watch;
use tracing::{debug, error, info, warn};

pub use validation::validate;

pub mod validation;

#[cfg(test)]
mod tests;

#[derive(Debug, Clone)]
pub struct ContactFormServiceImpl<Delivery> {
    delivery: Delivery,
    config: ContactFormServiceConfig,
    state: Arc<State>,
}

#[derive(Debug, Clone)]
pub struct ContactFormServiceConfig {
    /// `None` if the delivery service is not configured.
    pub credentials: Option<DeliveryCredentials>,
    /// How long the form stays in [`SubmissionState::Success`].
    pub success_dismiss: Duration,
}

#[derive(Debug)]
struct State {
    view: watch::Sender<ContactFormView>,
}

impl Default for State {
    fn default() -> Self {
        Self {
            view: watch::channel(ContactFormView::default()).0,
        }
    }
}

impl State {
    /// Applies the result of the delivery call, provided `attempt` is still
    /// the one in flight.
    fn complete(&self, attempt: u64, result: Result<(), SubmissionFailure>) -> bool {
        self.view.send_if_modified(|view| {
            if view.attempt != attempt || !view.is_submitting() {
                return false;
            }

            match result {
                Ok(()) => {
                    view.state = SubmissionState::Success;
                    view.email.clear();
                    view.message.clear();
                }
                Err(failure) => view.state = SubmissionState::Failure(failure),
            }

            true
        })
    }
}

/// Fails the attempt if the submit future is dropped before the delivery
/// call resolves, so the form never stays stuck in `Submitting`.
struct InFlight {
    state: Arc<State>,
    attempt: u64,
    done: bool,
}

impl InFlight {
    fn finish(mut self, result: Result<(), SubmissionFailure>) {
        self.done = true;
        self.state.complete(self.attempt, result);
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        if self.done {
            return;
        }
        if self
            .state
            .complete(self.attempt, Err(SubmissionFailure::Delivery))
        {
            warn!(
                attempt = self.attempt,
                "Contact message was abandoned before delivery finished"
            );
        }
    }
}

enum Attempt {
    Ignored,
    Rejected(SubmissionFailure),
    Send {
        attempt: u64,
        submission: ContactSubmission,
        credentials: DeliveryCredentials,
    },
}

impl<Delivery> ContactFormServiceImpl<Delivery> {
    pub fn new(delivery: Delivery, config: ContactFormServiceConfig) -> Self {
        Self {
            delivery,
            config,
            state: Default::default(),
        }
    }

    fn edit(&self, f: impl FnOnce(&mut ContactFormView)) -> bool {
        self.state.view.send_if_modified(|view| {
            if view.is_submitting() {
                return false;
            }
            f(view);
            true
        })
    }

    /// Starts a new attempt and moves to `Submitting`, or straight to
    /// `Failure` if the fields are invalid or credentials are missing.
    fn begin(&self) -> Attempt {
        let mut attempt = Attempt::Ignored;

        self.state.view.send_if_modified(|view| {
            if view.is_submitting() {
                return false;
            }

            view.attempt += 1;
            view.state = SubmissionState::Idle;

            let checked = validate(&view.email, &view.message)
                .map_err(SubmissionFailure::from)
                .and_then(|()| {
                    self.config
                        .credentials
                        .clone()
                        .ok_or(SubmissionFailure::NotConfigured)
                });

            match checked {
                Ok(credentials) => {
                    view.state = SubmissionState::Submitting;
                    attempt = Attempt::Send {
                        attempt: view.attempt,
                        submission: ContactSubmission::new(&*view.email, &*view.message),
                        credentials,
                    };
                }
                Err(failure) => {
                    view.state = SubmissionState::Failure(failure);
                    attempt = Attempt::Rejected(failure);
                }
            }

            true
        });

        attempt
    }

    /// Returns the form from `Success` to `Idle` once the dismiss delay has
    /// passed, unless another attempt has started in the meantime.
    fn schedule_dismiss(&self, attempt: u64) {
        let state = Arc::clone(&self.state);
        let delay = self.config.success_dismiss;

        tokio::spawn(async move {
            tokio::time::sleep(delay).await;

            let dismissed = state.view.send_if_modified(|view| {
                if view.attempt != attempt || !view.show_success() {
                    return false;
                }
                view.state = SubmissionState::Idle;
                true
            });

            if dismissed {
                debug!(attempt, "Dismissed success banner");
            }
        });
    }
}

impl<Delivery> ContactFormService for ContactFormServiceImpl<Delivery>
where
    Delivery: EmailDeliveryService,
{
    fn view(&self) -> ContactFormView {
        self.state.view.borrow().clone()
    }

    fn subscribe(&self) -> watch::Receiver<ContactFormView> {
        self.state.view.subscribe()
    }

    fn set_email(&self, email: String) -> bool {
        self.edit(|view| view.email = email)
    }

    fn set_message(&self, message: String) -> bool {
        self.edit(|view| view.message = message)
    }

    async fn submit(&self) -> SubmitOutcome {
        let (attempt, submission, credentials) = match self.begin() {
            Attempt::Ignored => {
                debug!("Ignoring submit while a message is being sent");
                return SubmitOutcome::Ignored;
            }
            Attempt::Rejected(failure) => {
                info!("Rejected contact form: {failure}");
                return SubmitOutcome::Failed(failure);
            }
            Attempt::Send {
                attempt,
                submission,
                credentials,
            } => (attempt, submission, credentials),
        };

        info!(attempt, "Sending contact message");

        let in_flight = InFlight {
            state: Arc::clone(&self.state),
            attempt,
            done: false,
        };

        let result = self
            .delivery
            .send(&credentials, &submission)
            .await
            .map_err(|err| {
                error!(attempt, "Failed to send contact message: {err:#}");
                SubmissionFailure::Delivery
            });

        in_flight.finish(result);

        match result {
            Ok(()) => {
                info!(attempt, "Contact message sent");
                self.schedule_dismiss(attempt);
                SubmitOutcome::Sent
            }
            Err(failure) => SubmitOutcome::Failed(failure),
        }
    }
}
