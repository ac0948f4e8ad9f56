//! Tests for audit sinks

use chrono::{TimeZone, Utc};
use interview_expiry::core::{
    build_audit_event, AuditSink, InMemoryAuditSink, InterviewId, InterviewStatus,
};

#[test]
fn test_build_audit_event() {
    let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 30, 1).unwrap();
    let expired_at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 30, 0).unwrap();
    let event = build_audit_event(
        InterviewId::from("iv-1"),
        InterviewStatus::InProgress,
        Some(expired_at),
        now,
    );

    assert_eq!(event.interview_id.as_str(), "iv-1");
    assert_eq!(event.from, InterviewStatus::InProgress);
    assert_eq!(event.to, InterviewStatus::Cancelled);
    assert_eq!(event.expired_at, Some(expired_at));
    assert_eq!(event.recorded_at, now);
    assert!(uuid::Uuid::parse_str(&event.event_id).is_ok());
}

#[test]
fn test_audit_sink_overflow() {
    let sink = InMemoryAuditSink::new(2);
    let now = Utc::now();

    for id in ["iv-1", "iv-2", "iv-3"] {
        sink.record(build_audit_event(
            InterviewId::from(id),
            InterviewStatus::InProgress,
            None,
            now,
        ));
    }

    let events = sink.events();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].interview_id.as_str(), "iv-2"); // First one popped
    assert_eq!(events[1].interview_id.as_str(), "iv-3");
}

#[test]
fn test_zero_capacity_sink_drops_everything() {
    let sink = InMemoryAuditSink::new(0);
    sink.record(build_audit_event(
        InterviewId::from("iv-1"),
        InterviewStatus::InProgress,
        None,
        Utc::now(),
    ));
    assert!(sink.events().is_empty());
}
