use std::path::Path;

use folio::{
    commands::contact::{send, SUCCESS_BANNER},
    environment::{ConfigProvider, Provider},
};
use folio_config::DEFAULT_CONFIG_PATH;
use folio_core_contact_contracts::{
    ContactFormService, SubmissionFailure, SubmissionState, SubmitOutcome,
};
use folio_demo::{EMAIL_1, MESSAGE_1, PUBLIC_KEY, SERVICE_ID, TEMPLATE_ID};
use folio_testing::emailjs::{FakeEmailJs, SEND_ROUTE};
use pretty_assertions::assert_eq;
use tokio::net::TcpListener;

#[tokio::test]
async fn submit_through_emailjs() {
    let (provider, fake) = setup(true).await;
    let form = provider.contact_form();

    form.set_email(EMAIL_1.into());
    form.set_message(MESSAGE_1.into());
    let outcome = form.submit().await;

    assert_eq!(outcome, SubmitOutcome::Sent);
    assert_eq!(form.view().state, SubmissionState::Success);
    assert_eq!(form.view().email, "");

    let outbox = fake.outbox().await;
    assert_eq!(outbox.len(), 1);
    assert_eq!(outbox[0].template_params["email"], EMAIL_1);
    assert_eq!(outbox[0].template_params["message"], MESSAGE_1);
}

#[tokio::test]
async fn send_command_ok() {
    let (provider, fake) = setup(true).await;

    let banner = send(&provider, EMAIL_1.into(), MESSAGE_1.into())
        .await
        .unwrap();

    assert_eq!(banner, SUCCESS_BANNER);
    assert_eq!(fake.outbox().await.len(), 1);
}

#[tokio::test]
async fn send_command_invalid() {
    let (provider, fake) = setup(true).await;

    let err = send(&provider, "foo@bar".into(), MESSAGE_1.into())
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Please enter a valid email address");
    assert!(fake.outbox().await.is_empty());
}

#[tokio::test]
async fn send_command_not_configured() {
    let (provider, fake) = setup(false).await;

    let err = send(&provider, EMAIL_1.into(), MESSAGE_1.into())
        .await
        .unwrap_err();

    assert!(err
        .to_string()
        .starts_with("Email service is not configured."));
    assert!(fake.outbox().await.is_empty());
}

#[tokio::test]
async fn rejected_by_provider() {
    let fake = FakeEmailJs::new(SERVICE_ID, TEMPLATE_ID, "another-key");
    let provider = setup_with(fake.clone(), true).await;
    let form = provider.contact_form();

    form.set_email(EMAIL_1.into());
    form.set_message(MESSAGE_1.into());
    let outcome = form.submit().await;

    assert_eq!(outcome, SubmitOutcome::Failed(SubmissionFailure::Delivery));
    assert_eq!(
        form.view().error_message().as_deref(),
        Some("Failed to send message. Please try again or contact me directly.")
    );
    assert_eq!(form.view().email, EMAIL_1);
    assert!(fake.outbox().await.is_empty());
}

async fn setup(configured: bool) -> (Provider, FakeEmailJs) {
    let fake = FakeEmailJs::new(SERVICE_ID, TEMPLATE_ID, PUBLIC_KEY);
    let provider = setup_with(fake.clone(), configured).await;
    (provider, fake)
}

async fn setup_with(fake: FakeEmailJs, configured: bool) -> Provider {
    let listener = TcpListener::bind(("127.0.0.1", 0)).await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(fake.serve(listener));

    let endpoint = format!("email.endpoint = \"http://{addr}{SEND_ROUTE}\"");
    let credentials = [
        format!("email.service_id = \"{SERVICE_ID}\""),
        format!("email.template_id = \"{TEMPLATE_ID}\""),
        format!("email.public_key = \"{PUBLIC_KEY}\""),
    ];

    let mut overrides = vec![endpoint.as_str()];
    if configured {
        overrides.extend(credentials.iter().map(String::as_str));
    }

    let config =
        folio_config::load_with_override(&[Path::new(DEFAULT_CONFIG_PATH)], &overrides).unwrap();
    Provider::new(ConfigProvider::new(&config).unwrap()).unwrap()
}
