//! Sample data shared by the tests of the workspace crates.

use std::sync::LazyLock;

use folio_models::{contact::ContactSubmission, delivery::DeliveryCredentials};

pub const SERVICE_ID: &str = "service_portfolio";
pub const TEMPLATE_ID: &str = "template_contact";
pub const PUBLIC_KEY: &str = "pk_3nR9vXq2LmT8";

pub static CREDENTIALS: LazyLock<DeliveryCredentials> = LazyLock::new(|| DeliveryCredentials {
    service_id: SERVICE_ID.into(),
    template_id: TEMPLATE_ID.into(),
    public_key: PUBLIC_KEY.into(),
});

pub const EMAIL_1: &str = "a@b.com";
pub const MESSAGE_1: &str = "Hello there, this is long enough.";

pub const EMAIL_2: &str = "visitor@example.org";
pub const MESSAGE_2: &str = "Would you be available for a short project in spring?";

pub static SUBMISSION_1: LazyLock<ContactSubmission> =
    LazyLock::new(|| ContactSubmission::new(EMAIL_1, MESSAGE_1));

pub static SUBMISSION_2: LazyLock<ContactSubmission> =
    LazyLock::new(|| ContactSubmission::new(EMAIL_2, MESSAGE_2));
