//! Audit trail for committed expiry cancellations.
//!
//! Provides a bounded in-memory sink and a sink that forwards to `tracing`.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{InterviewId, InterviewStatus};

/// One committed expiry transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpiryAuditEvent {
    /// Event identifier (uuid v4).
    pub event_id: String,
    /// Interview that was cancelled.
    pub interview_id: InterviewId,
    /// Status observed before the transition.
    pub from: InterviewStatus,
    /// Status written.
    pub to: InterviewStatus,
    /// When the interview ran out of time, if known.
    pub expired_at: Option<DateTime<Utc>>,
    /// When the reconciler committed the transition.
    pub recorded_at: DateTime<Utc>,
}

/// Audit sink abstraction.
pub trait AuditSink: Send + Sync {
    /// Record an audit event.
    fn record(&self, event: ExpiryAuditEvent);
}

/// In-memory audit sink for testing and dev.
pub struct InMemoryAuditSink {
    events: parking_lot::Mutex<VecDeque<ExpiryAuditEvent>>,
    max_events: usize,
}

impl InMemoryAuditSink {
    /// Create a new in-memory sink with a bounded buffer.
    #[must_use]
    pub fn new(max_events: usize) -> Self {
        Self {
            events: parking_lot::Mutex::new(VecDeque::with_capacity(max_events)),
            max_events,
        }
    }

    /// Retrieve a snapshot of stored events, oldest first.
    #[must_use]
    pub fn events(&self) -> Vec<ExpiryAuditEvent> {
        self.events.lock().iter().cloned().collect()
    }
}

impl AuditSink for InMemoryAuditSink {
    fn record(&self, event: ExpiryAuditEvent) {
        if self.max_events == 0 {
            return;
        }
        let mut events = self.events.lock();
        if events.len() >= self.max_events {
            events.pop_front();
        }
        events.push_back(event);
    }
}

/// Sink that emits each event as a structured `tracing` record.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingAuditSink;

impl AuditSink for TracingAuditSink {
    fn record(&self, event: ExpiryAuditEvent) {
        tracing::info!(
            target: "interview_expiry::audit",
            event_id = %event.event_id,
            interview_id = %event.interview_id,
            from = %event.from,
            to = %event.to,
            recorded_at = %event.recorded_at,
            "interview expiry committed"
        );
    }
}

/// Helper to build an audit event for a cancellation.
pub fn build_audit_event(
    interview_id: InterviewId,
    from: InterviewStatus,
    expired_at: Option<DateTime<Utc>>,
    recorded_at: DateTime<Utc>,
) -> ExpiryAuditEvent {
    ExpiryAuditEvent {
        event_id: uuid::Uuid::new_v4().to_string(),
        interview_id,
        from,
        to: InterviewStatus::Cancelled,
        expired_at,
        recorded_at,
    }
}
