//! Tests for the verification manager

use chrono::Duration;
use std::sync::Arc;

use super::mocks::{LocalFixture, MockMailer, MockRemoteAuthority, RemoteMode};
use crate::domain::entities::VerificationRecord;
use crate::domain::value_objects::AuthorityKind;
use crate::errors::{DomainError, VerificationError};
use crate::services::verification::{Clock, VerificationState};

fn seed(fixture: &LocalFixture, email: &str, code: &str) {
    let record = VerificationRecord::with_code(email, code, fixture.clock.now());
    fixture
        .store
        .put_raw("raseed_2fa_codes", &record.to_json().unwrap());
}

#[tokio::test]
async fn test_local_success_then_is_verified() {
    let fixture = LocalFixture::new();
    let manager = fixture.manager();
    seed(&fixture, "a@x.com", "482913");

    fixture.advance(Duration::minutes(3));

    assert!(manager.verify_code("482913", "a@x.com").await.unwrap());
    assert!(manager.is_verified("a@x.com").await);
}

#[tokio::test]
async fn test_email_mismatch_is_rejected() {
    let fixture = LocalFixture::new();
    let manager = fixture.manager();
    seed(&fixture, "a@x.com", "482913");

    assert!(!manager.verify_code("482913", "b@other.com").await.unwrap());
    assert!(!manager.is_verified("b@other.com").await);
    assert!(!manager.is_verified("a@x.com").await);
}

#[tokio::test]
async fn test_expired_code_is_rejected() {
    let fixture = LocalFixture::new();
    let manager = fixture.manager();
    seed(&fixture, "a@x.com", "482913");

    fixture.advance(Duration::minutes(11));

    assert!(!manager.verify_code("482913", "a@x.com").await.unwrap());
    assert_eq!(manager.time_remaining().await, Duration::zero());
    assert_eq!(manager.state("a@x.com").await, VerificationState::Expired);
}

#[tokio::test]
async fn test_send_then_verify_with_delivered_code() {
    let fixture = LocalFixture::new();
    let manager = fixture.manager();

    let token = manager.send_code("a@x.com", Some("Alice")).await.unwrap();
    assert_eq!(token.authority, AuthorityKind::Local);
    assert_eq!(manager.state("a@x.com").await, VerificationState::Pending);

    let code = fixture.mailer.last_code().unwrap();
    assert!(manager.verify_code(&code, "a@x.com").await.unwrap());
    assert_eq!(manager.state("a@x.com").await, VerificationState::Verified);
}

#[tokio::test]
async fn test_clear_resets_verification() {
    let fixture = LocalFixture::new();
    let manager = fixture.manager();
    manager.send_code("a@x.com", None).await.unwrap();
    let code = fixture.mailer.last_code().unwrap();
    assert!(manager.verify_code(&code, "a@x.com").await.unwrap());

    manager.clear().await;

    assert!(!manager.is_verified("a@x.com").await);
    assert!(!manager.verify_code(&code, "a@x.com").await.unwrap());
    assert_eq!(manager.state("a@x.com").await, VerificationState::NoCode);
    assert_eq!(manager.time_remaining().await, Duration::zero());

    // Clearing twice is harmless
    manager.clear().await;
}

#[tokio::test]
async fn test_resend_invalidates_previous_code() {
    let fixture = LocalFixture::new();
    let manager = fixture.manager();
    seed(&fixture, "a@x.com", "482913");

    fixture.advance(Duration::minutes(8));
    manager.resend_code("a@x.com", None).await.unwrap();
    let new_code = fixture.mailer.last_code().unwrap();

    if new_code != "482913" {
        assert!(!manager.verify_code("482913", "a@x.com").await.unwrap());
    }
    // Timer restarted by the resend
    assert_eq!(manager.time_remaining().await, Duration::minutes(10));
    assert!(manager.verify_code(&new_code, "a@x.com").await.unwrap());
}

#[tokio::test]
async fn test_send_for_other_email_overwrites_record() {
    let fixture = LocalFixture::new();
    let manager = fixture.manager();
    seed(&fixture, "a@x.com", "482913");

    manager.send_code("b@other.com", None).await.unwrap();

    assert!(!manager.verify_code("482913", "a@x.com").await.unwrap());
    assert_eq!(manager.state("a@x.com").await, VerificationState::NoCode);
}

#[tokio::test]
async fn test_time_remaining_is_non_increasing() {
    let fixture = LocalFixture::new();
    let manager = fixture.manager();
    manager.send_code("a@x.com", None).await.unwrap();

    let mut previous = manager.time_remaining().await;
    assert_eq!(previous, Duration::minutes(10));
    for _ in 0..12 {
        fixture.advance(Duration::minutes(1));
        let remaining = manager.time_remaining().await;
        assert!(remaining <= previous);
        previous = remaining;
    }
    assert_eq!(previous, Duration::zero());
}

#[tokio::test]
async fn test_send_rejects_blank_email() {
    let fixture = LocalFixture::new();
    let manager = fixture.manager();

    let result = manager.send_code("  ", None).await;

    assert!(matches!(
        result,
        Err(DomainError::Verification(VerificationError::InvalidEmail { .. }))
    ));
}

#[tokio::test]
async fn test_delivery_failure_surfaces() {
    let fixture = LocalFixture::with_mailer(MockMailer::new(true));
    let manager = fixture.manager();

    let result = manager.send_code("a@x.com", None).await;

    assert!(matches!(
        result,
        Err(DomainError::Verification(VerificationError::DeliveryFailed(_)))
    ));
}

#[tokio::test]
async fn test_confirm_code_reports_validation_failure() {
    let fixture = LocalFixture::new();
    let manager = fixture.manager();
    seed(&fixture, "a@x.com", "482913");

    let err = manager.confirm_code("000000", "a@x.com").await.unwrap_err();
    assert_eq!(err.as_verification(), Some(&VerificationError::ValidationFailed));

    manager.confirm_code("482913", "a@x.com").await.unwrap();
}

#[tokio::test]
async fn test_remote_send_takes_precedence() {
    let fixture = LocalFixture::new();
    let remote = Arc::new(MockRemoteAuthority::new(RemoteMode::Available));
    let manager = fixture.manager_with_remote(remote.clone());
    assert!(manager.has_remote());

    let token = manager.send_code("a@x.com", None).await.unwrap();

    assert!(token.is_remote());
    assert_eq!(token.reference, "Verification email sent");
    assert_eq!(fixture.mailer.sent_count(), 0);
    assert_eq!(remote.calls(), vec!["send:a@x.com".to_string()]);
}

#[tokio::test]
async fn test_remote_send_clears_local_record() {
    let fixture = LocalFixture::new();
    let remote = Arc::new(MockRemoteAuthority::new(RemoteMode::Available));
    let manager = fixture.manager_with_remote(remote.clone());
    seed(&fixture, "a@x.com", "111111");

    manager.resend_code("a@x.com", None).await.unwrap();
    assert_eq!(remote.calls(), vec!["resend:a@x.com".to_string()]);

    remote.set_mode(RemoteMode::Unreachable);
    assert!(!manager.verify_code("111111", "a@x.com").await.unwrap());
}

#[tokio::test]
async fn test_remote_verify_persists_local_marker() {
    let fixture = LocalFixture::new();
    let remote = Arc::new(MockRemoteAuthority::new(RemoteMode::Available));
    let manager = fixture.manager_with_remote(remote.clone());
    manager.send_code("a@x.com", None).await.unwrap();

    assert!(manager.verify_code("482913", "a@x.com").await.unwrap());
    assert_eq!(fixture.stored_json().unwrap()["verified"], true);

    // Local state answers once the backend goes away
    remote.set_mode(RemoteMode::Unreachable);
    assert!(manager.is_verified("a@x.com").await);
}

#[tokio::test]
async fn test_local_code_verifies_after_remote_recovers() {
    let fixture = LocalFixture::new();
    let remote = Arc::new(MockRemoteAuthority::new(RemoteMode::Unreachable));
    let manager = fixture.manager_with_remote(remote.clone());

    let token = manager.send_code("a@x.com", None).await.unwrap();
    assert_eq!(token.authority, AuthorityKind::Local);
    let code = fixture.mailer.last_code().unwrap();

    // Backend is back and knows nothing about the mailed code
    remote.set_mode(RemoteMode::Available);

    assert!(manager.verify_code(&code, "a@x.com").await.unwrap());
    assert!(manager.is_verified("a@x.com").await);
    assert_eq!(manager.state("a@x.com").await, VerificationState::Verified);
    assert_eq!(
        remote.calls(),
        vec![
            "send:a@x.com".to_string(),
            "verify:a@x.com".to_string(),
            "status:a@x.com".to_string(),
        ]
    );
}

#[tokio::test]
async fn test_remote_and_local_both_decline() {
    let fixture = LocalFixture::new();
    let remote = Arc::new(MockRemoteAuthority::new(RemoteMode::Available));
    let manager = fixture.manager_with_remote(remote.clone());
    seed(&fixture, "a@x.com", "482913");

    assert!(!manager.verify_code("111111", "a@x.com").await.unwrap());
    assert!(!manager.is_verified("a@x.com").await);
    assert_eq!(manager.state("a@x.com").await, VerificationState::Pending);
}

#[tokio::test]
async fn test_remote_issued_code_is_not_matched_locally_after_decline() {
    let fixture = LocalFixture::new();
    let remote = Arc::new(MockRemoteAuthority::new(RemoteMode::Available));
    let manager = fixture.manager_with_remote(remote.clone());
    seed(&fixture, "a@x.com", "111111");

    // Remote send clears the older local record, so the local fallthrough finds nothing
    manager.send_code("a@x.com", None).await.unwrap();
    assert!(!manager.verify_code("111111", "a@x.com").await.unwrap());
    assert!(fixture.stored_json().is_none());
}

#[tokio::test]
async fn test_entered_code_is_compared_exactly() {
    let fixture = LocalFixture::new();
    let manager = fixture.manager();
    seed(&fixture, "a@x.com", "482913");

    assert!(!manager.verify_code(" 482913\n", "a@x.com").await.unwrap());
    assert!(!manager.verify_code("482913 ", "a@x.com").await.unwrap());
    assert!(manager.verify_code("482913", "a@x.com").await.unwrap());
}

#[tokio::test]
async fn test_unreachable_remote_falls_back_to_local() {
    let fixture = LocalFixture::new();
    let remote = Arc::new(MockRemoteAuthority::new(RemoteMode::Unreachable));
    let manager = fixture.manager_with_remote(remote.clone());

    let token = manager.send_code("a@x.com", None).await.unwrap();
    assert_eq!(token.authority, AuthorityKind::Local);
    assert_eq!(fixture.mailer.sent_count(), 1);

    let code = fixture.mailer.last_code().unwrap();
    assert!(manager.verify_code(&code, "a@x.com").await.unwrap());
    assert!(manager.is_verified("a@x.com").await);
    assert_eq!(
        remote.calls(),
        vec![
            "send:a@x.com".to_string(),
            "verify:a@x.com".to_string(),
            "status:a@x.com".to_string(),
        ]
    );
}

#[tokio::test]
async fn test_rejected_remote_falls_back_to_local() {
    let fixture = LocalFixture::new();
    let remote = Arc::new(MockRemoteAuthority::new(RemoteMode::Rejected(500)));
    let manager = fixture.manager_with_remote(remote);
    seed(&fixture, "a@x.com", "482913");

    assert!(manager.verify_code("482913", "a@x.com").await.unwrap());
    assert!(manager.is_verified("a@x.com").await);
}

#[tokio::test]
async fn test_fallback_delivery_failure_surfaces() {
    let fixture = LocalFixture::with_mailer(MockMailer::new(true));
    let remote = Arc::new(MockRemoteAuthority::new(RemoteMode::Unreachable));
    let manager = fixture.manager_with_remote(remote);

    let result = manager.resend_code("a@x.com", None).await;

    assert!(matches!(
        result,
        Err(DomainError::Verification(VerificationError::DeliveryFailed(_)))
    ));
}
