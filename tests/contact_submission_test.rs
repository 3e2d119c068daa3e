use anyhow::Result;
use async_trait::async_trait;
use renovivo_quote::core::contact::{submit_contact, MISSING_FIELDS_MESSAGE};
use renovivo_quote::domain::ports::{ContactGateway, SubmissionReceipt};
use renovivo_quote::utils::error::ErrorSeverity;
use renovivo_quote::{
    Catalog, ContactInfo, QuoteError, QuoteSession, SelectionEvent, SimulatedContactGateway,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio_test::{assert_err, assert_ok};

/// Counts calls; optionally fails every one of them.
#[derive(Default)]
struct RecordingGateway {
    calls: AtomicUsize,
    fail: bool,
}

#[async_trait]
impl ContactGateway for RecordingGateway {
    async fn submit(&self, contact: &ContactInfo) -> renovivo_quote::Result<SubmissionReceipt> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(QuoteError::SubmissionError {
                message: "connection refused".to_string(),
            });
        }
        Ok(SubmissionReceipt {
            reference: format!("REC-{}", contact.phone),
        })
    }
}

#[tokio::test]
async fn test_missing_phone_fails_locally_without_submission() -> Result<()> {
    let mut session = QuoteSession::new(Catalog::default())?;
    session.apply(SelectionEvent::AreaChanged(120))?;
    session.apply(SelectionEvent::ContactChanged(ContactInfo::new(
        "Иван Иванов",
        "",
        "ivan@example.bg",
    )))?;
    let state_before = session.state().clone();
    let breakdown_before = *session.breakdown();

    let gateway = RecordingGateway::default();
    let err = assert_err!(submit_contact(&gateway, &session.state().contact_info).await);

    assert!(matches!(err, QuoteError::ValidationError { .. }));
    assert_eq!(err.user_friendly_message(), MISSING_FIELDS_MESSAGE);
    assert_eq!(err.severity(), ErrorSeverity::Low);
    assert_eq!(gateway.calls.load(Ordering::SeqCst), 0);

    assert_eq!(session.state(), &state_before);
    assert_eq!(*session.breakdown(), breakdown_before);
    Ok(())
}

#[tokio::test]
async fn test_each_missing_field_is_rejected() {
    let gateway = RecordingGateway::default();
    for contact in [
        ContactInfo::new("", "0888 123 456", "ivan@example.bg"),
        ContactInfo::new("Иван", "0888 123 456", ""),
        ContactInfo::new("Иван", " ", "ivan@example.bg"),
        ContactInfo::default(),
    ] {
        assert_err!(submit_contact(&gateway, &contact).await);
    }
    assert_eq!(gateway.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_complete_form_reaches_gateway() {
    let gateway = RecordingGateway::default();
    let contact = ContactInfo::new("Иван", "0888123456", "ivan@example.bg");

    let receipt = assert_ok!(submit_contact(&gateway, &contact).await);
    assert_eq!(receipt.reference, "REC-0888123456");
    assert_eq!(gateway.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_transport_failure_is_reported_not_retried() {
    let gateway = RecordingGateway {
        fail: true,
        ..Default::default()
    };
    let contact = ContactInfo::new("Иван", "0888123456", "ivan@example.bg");

    let err = assert_err!(submit_contact(&gateway, &contact).await);
    assert!(matches!(err, QuoteError::SubmissionError { .. }));
    assert!(err.is_recoverable());
    assert_eq!(gateway.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_simulated_gateway_waits_then_succeeds() {
    let gateway = SimulatedContactGateway::new(Duration::from_millis(20));
    let contact = ContactInfo::new("Иван", "0888123456", "ivan@example.bg");

    let started = std::time::Instant::now();
    let receipt = assert_ok!(submit_contact(&gateway, &contact).await);
    assert!(started.elapsed() >= Duration::from_millis(20));
    assert!(receipt.reference.starts_with("SIM-"));
}
