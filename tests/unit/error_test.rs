//! Tests for error types

use interview_expiry::core::{ExpiryError, InterviewId};

#[test]
fn test_not_found_error() {
    let err = ExpiryError::NotFound(InterviewId::from("iv-9"));
    assert_eq!(format!("{}", err), "interview not found: iv-9");
    assert!(!err.is_retryable());
}

#[test]
fn test_persistence_error_is_retryable() {
    let err = ExpiryError::persistence("status update failed", "connection reset");
    assert_eq!(
        format!("{}", err),
        "persistence failure: status update failed: connection reset"
    );
    assert!(err.is_retryable());
}

#[test]
fn test_unauthenticated_error() {
    let err = ExpiryError::Unauthenticated;
    assert_eq!(format!("{}", err), "unauthenticated caller");
    assert!(!err.is_retryable());
}
