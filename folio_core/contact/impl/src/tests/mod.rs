use std::time::Duration;

use folio_core_contact_contracts::ContactFormService;
use folio_demo::CREDENTIALS;
use folio_email_contracts::MockEmailDeliveryService;
use folio_models::delivery::DeliveryCredentials;

use crate::{ContactFormServiceConfig, ContactFormServiceImpl};

mod dismiss;

type Sut = ContactFormServiceImpl<MockEmailDeliveryService>;

const SUCCESS_DISMISS: Duration = Duration::from_secs(5);

fn make_sut(delivery: MockEmailDeliveryService) -> Sut {
    make_sut_with_credentials(delivery, Some(CREDENTIALS.clone()))
}

fn make_sut_with_credentials(
    delivery: MockEmailDeliveryService,
    credentials: Option<DeliveryCredentials>,
) -> Sut {
    ContactFormServiceImpl::new(
        delivery,
        ContactFormServiceConfig {
            credentials,
            success_dismiss: SUCCESS_DISMISS,
        },
    )
}

fn fill(sut: &Sut, email: &str, message: &str) {
    assert!(sut.set_email(email.into()));
    assert!(sut.set_message(message.into()));
}
