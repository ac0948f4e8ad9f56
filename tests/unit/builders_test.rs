//! Tests for builder modules

use interview_expiry::builders::build_reconciler;
use interview_expiry::config::{ReconcilerConfig, StoreBackendConfig};
use interview_expiry::core::{ExpiryError, InterviewId};

#[tokio::test]
async fn test_build_in_memory_reconciler() {
    let cfg = ReconcilerConfig {
        audit_capacity: 16,
        ..ReconcilerConfig::default()
    };
    let built = build_reconciler(&cfg).expect("in-memory reconciler");
    assert!(built.audit.is_some());

    let result = built.reconciler.reconcile(&InterviewId::from("nobody")).await;
    assert!(matches!(result, Err(ExpiryError::NotFound(_))));
}

#[test]
fn test_build_without_audit_buffer() {
    let built = build_reconciler(&ReconcilerConfig::default()).expect("in-memory reconciler");
    assert!(built.audit.is_none());
}

#[test]
fn test_build_rejects_invalid_config() {
    let cfg = ReconcilerConfig {
        store: StoreBackendConfig::Postgres,
        database_url: None,
        ..ReconcilerConfig::default()
    };
    let err = build_reconciler(&cfg).err().expect("invalid config rejected");

    assert!(err.to_string().contains("config invalid"));
    // A bad config is a setup failure, not a transient store outage.
    assert!(err.downcast_ref::<ExpiryError>().is_none());
}

#[test]
fn test_build_rejects_zero_pool_size() {
    let cfg = ReconcilerConfig {
        pool_max_size: 0,
        ..ReconcilerConfig::default()
    };
    let err = build_reconciler(&cfg).err().expect("invalid config rejected");
    assert!(err.downcast_ref::<ExpiryError>().is_none());
}
