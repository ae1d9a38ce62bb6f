use std::future::Future;

use folio_models::{contact::ContactSubmission, delivery::DeliveryCredentials};

/// Hands a contact submission to the external email delivery provider.
#[cfg_attr(feature = "mock", mockall::automock)]
pub trait EmailDeliveryService: Send + Sync + 'static {
    /// Resolves once the provider accepted the message. Any error means the
    /// message was not delivered.
    fn send(
        &self,
        credentials: &DeliveryCredentials,
        submission: &ContactSubmission,
    ) -> impl Future<Output = anyhow::Result<()>> + Send;
}

#[cfg(feature = "mock")]
impl MockEmailDeliveryService {
    pub fn with_send(
        mut self,
        credentials: DeliveryCredentials,
        submission: ContactSubmission,
        result: anyhow::Result<()>,
    ) -> Self {
        self.expect_send()
            .once()
            .with(
                mockall::predicate::eq(credentials),
                mockall::predicate::eq(submission),
            )
            .return_once(move |_, _| Box::pin(std::future::ready(result)));
        self
    }

    /// Expects that nothing is ever sent.
    pub fn with_no_send(mut self) -> Self {
        self.expect_send().never();
        self
    }
}
