//! Tests for the reconcile request/reply surface

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use interview_expiry::core::{ExpiryError, InterviewId, InterviewRecord, InterviewStatus, Reconciler};
use interview_expiry::infra::{InMemoryInterviewStore, NoopInvalidator};
use interview_expiry::runtime::{handle_reconcile, health, Actor, ReconcileReply, ReconcileRequest};
use interview_expiry::util::ManualClock;

fn actor() -> Actor {
    Actor {
        id: "recruiter-1".into(),
    }
}

#[tokio::test]
async fn test_unauthenticated_request_touches_nothing() {
    let store = Arc::new(InMemoryInterviewStore::new());
    let clock = ManualClock::new(Utc.with_ymd_and_hms(2024, 1, 1, 2, 0, 0).unwrap());
    let id = InterviewId::from("iv-1");
    store.insert(InterviewRecord::pending(id.clone(), Some(30)));
    store
        .start(&id, Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap())
        .unwrap();
    let reconciler = Reconciler::new(store.clone(), NoopInvalidator, clock);

    let reply = handle_reconcile(&reconciler, None, ReconcileRequest { interview_id: id.clone() }).await;

    assert_eq!(reply, ReconcileReply::Unauthenticated);
    assert_eq!(reply.status_code(), 401);
    assert_eq!(store.get(&id).unwrap().status, InterviewStatus::InProgress);
    assert_eq!(store.write_count(), 0);
}

#[tokio::test]
async fn test_not_found_reply() {
    let reconciler = Reconciler::new(
        InMemoryInterviewStore::new(),
        NoopInvalidator,
        ManualClock::new(Utc::now()),
    );
    let reply = handle_reconcile(
        &reconciler,
        Some(&actor()),
        ReconcileRequest {
            interview_id: InterviewId::from("ghost"),
        },
    )
    .await;

    assert_eq!(
        reply,
        ReconcileReply::NotFound {
            interview_id: InterviewId::from("ghost")
        }
    );
    assert_eq!(reply.status_code(), 404);
}

#[test]
fn test_persistence_failure_maps_to_retryable_reply() {
    let reply = ReconcileReply::from(ExpiryError::Persistence("db down".into()));
    assert_eq!(
        reply,
        ReconcileReply::Failure {
            message: "failed to check interview status".into(),
            retryable: true,
        }
    );
    assert_eq!(reply.status_code(), 503);
}

#[test]
fn test_reply_wire_format() {
    let reply = ReconcileReply::Ok {
        cancelled: true,
        status: InterviewStatus::Cancelled,
    };
    let json = serde_json::to_value(&reply).unwrap();
    assert_eq!(
        json,
        serde_json::json!({ "outcome": "ok", "cancelled": true, "status": "cancelled" })
    );

    let request: ReconcileRequest = serde_json::from_str(r#"{ "interview_id": "iv-7" }"#).unwrap();
    assert_eq!(request.interview_id.as_str(), "iv-7");
}

#[test]
fn test_health() {
    assert!(health().ok);
}
