use std::time::Duration;

use anyhow::anyhow;
use folio_core_contact_contracts::{
    ContactFormService, SubmissionFailure, SubmissionState, SubmitOutcome,
};
use folio_demo::{CREDENTIALS, EMAIL_1, EMAIL_2, MESSAGE_1, MESSAGE_2, SUBMISSION_1, SUBMISSION_2};
use folio_email_contracts::MockEmailDeliveryService;
use folio_models::contact::ValidationError;
use tokio::time::{sleep, Instant};

use super::{fill, make_sut, SUCCESS_DISMISS};

#[tokio::test(start_paused = true)]
async fn success_dismissed_after_delay() {
    // Arrange
    let delivery =
        MockEmailDeliveryService::new().with_send(CREDENTIALS.clone(), SUBMISSION_1.clone(), Ok(()));

    let sut = make_sut(delivery);
    fill(&sut, EMAIL_1, MESSAGE_1);
    assert_eq!(sut.submit().await, SubmitOutcome::Sent);

    let start = Instant::now();
    let mut receiver = sut.subscribe();

    // Act
    receiver.changed().await.unwrap();

    // Assert
    assert_eq!(receiver.borrow().state, SubmissionState::Idle);
    assert!(start.elapsed() >= SUCCESS_DISMISS);
    assert!(start.elapsed() < SUCCESS_DISMISS + Duration::from_secs(1));
}

#[tokio::test(start_paused = true)]
async fn success_visible_before_delay() {
    // Arrange
    let delivery =
        MockEmailDeliveryService::new().with_send(CREDENTIALS.clone(), SUBMISSION_1.clone(), Ok(()));

    let sut = make_sut(delivery);
    fill(&sut, EMAIL_1, MESSAGE_1);
    sut.submit().await;

    // Act
    sleep(SUCCESS_DISMISS - Duration::from_secs(1)).await;

    // Assert
    assert!(sut.view().show_success());
}

#[tokio::test(start_paused = true)]
async fn failure_is_never_dismissed() {
    // Arrange
    let delivery = MockEmailDeliveryService::new().with_send(
        CREDENTIALS.clone(),
        SUBMISSION_1.clone(),
        Err(anyhow!("timeout")),
    );

    let sut = make_sut(delivery);
    fill(&sut, EMAIL_1, MESSAGE_1);
    sut.submit().await;

    // Act
    sleep(SUCCESS_DISMISS * 3).await;

    // Assert
    assert_eq!(
        sut.view().state,
        SubmissionState::Failure(SubmissionFailure::Delivery)
    );
}

#[tokio::test(start_paused = true)]
async fn stale_dismiss_keeps_later_failure() {
    // Arrange
    let delivery =
        MockEmailDeliveryService::new().with_send(CREDENTIALS.clone(), SUBMISSION_1.clone(), Ok(()));

    let sut = make_sut(delivery);
    fill(&sut, EMAIL_1, MESSAGE_1);
    sut.submit().await;

    sleep(Duration::from_secs(2)).await;
    fill(&sut, EMAIL_1, "hi");
    assert_eq!(
        sut.submit().await,
        SubmitOutcome::Failed(ValidationError::MessageTooShort.into())
    );

    // Act
    sleep(SUCCESS_DISMISS).await;

    // Assert
    assert_eq!(
        sut.view().state,
        SubmissionState::Failure(ValidationError::MessageTooShort.into())
    );
}

#[tokio::test(start_paused = true)]
async fn stale_dismiss_keeps_later_success() {
    // Arrange
    let delivery = MockEmailDeliveryService::new()
        .with_send(CREDENTIALS.clone(), SUBMISSION_1.clone(), Ok(()))
        .with_send(CREDENTIALS.clone(), SUBMISSION_2.clone(), Ok(()));

    let sut = make_sut(delivery);
    fill(&sut, EMAIL_1, MESSAGE_1);
    sut.submit().await;

    sleep(Duration::from_secs(3)).await;
    fill(&sut, EMAIL_2, MESSAGE_2);
    assert_eq!(sut.submit().await, SubmitOutcome::Sent);

    // Act
    sleep(Duration::from_secs(3)).await;

    // Assert
    assert!(sut.view().show_success());
    assert_eq!(sut.view().attempt, 2);

    sleep(Duration::from_secs(3)).await;
    assert_eq!(sut.view().state, SubmissionState::Idle);
}
