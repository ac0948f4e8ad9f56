//! Authoritative expiry reconciliation.
//!
//! The reconciler never trusts caller-supplied interview state: every call
//! re-reads the store, re-derives expiry at the clock's current instant, and
//! commits at most one `in_progress -> cancelled` transition.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::core::audit::{build_audit_event, AuditSink};
use crate::core::evaluator::{expiry_instant, is_expired};
use crate::core::{CacheInvalidator, ExpiryError, InterviewId, InterviewStatus, InterviewStore};
use crate::util::clock::Clock;

/// Result of one reconcile call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconcileOutcome {
    /// Whether this call committed the cancellation.
    pub cancelled: bool,
    /// Resulting (or current) interview status.
    pub status: InterviewStatus,
}

impl ReconcileOutcome {
    const fn unchanged(status: InterviewStatus) -> Self {
        Self {
            cancelled: false,
            status,
        }
    }
}

/// Re-checks interview expiry against the store and cancels expired interviews.
pub struct Reconciler<S, C, K> {
    store: S,
    cache: C,
    clock: K,
    audit: Option<Arc<dyn AuditSink>>,
}

impl<S, C, K> Reconciler<S, C, K>
where
    S: InterviewStore,
    C: CacheInvalidator,
    K: Clock,
{
    /// Create a reconciler from its collaborators.
    pub const fn new(store: S, cache: C, clock: K) -> Self {
        Self {
            store,
            cache,
            clock,
            audit: None,
        }
    }

    /// Attach an audit sink notified of every committed cancellation.
    #[must_use]
    pub fn with_audit(mut self, audit: Arc<dyn AuditSink>) -> Self {
        self.audit = Some(audit);
        self
    }

    /// Borrow the store.
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Borrow the clock.
    pub const fn clock(&self) -> &K {
        &self.clock
    }

    /// Reconcile one interview.
    ///
    /// # Errors
    ///
    /// `NotFound` for unknown ids; `Persistence` when the load, the write or
    /// the cache invalidation fails. Nothing is retried here.
    pub async fn reconcile(&self, id: &InterviewId) -> Result<ReconcileOutcome, ExpiryError> {
        let record = self
            .store
            .find_status(id)
            .await
            .inspect_err(|e| tracing::error!(interview_id = %id, "failed to load interview: {e}"))?
            .ok_or_else(|| ExpiryError::NotFound(id.clone()))?;

        if !record.is_timed_and_running() {
            tracing::debug!(interview_id = %id, status = %record.status, "no expiry check needed");
            return Ok(ReconcileOutcome::unchanged(record.status));
        }

        let now = self.clock.now();
        if !is_expired(
            record.started_at,
            record.completed_at,
            record.time_limit_minutes,
            now,
        ) {
            tracing::debug!(interview_id = %id, "interview still within time limit");
            return Ok(ReconcileOutcome::unchanged(record.status));
        }

        let applied = self
            .store
            .cancel_if_in_progress(id)
            .await
            .inspect_err(|e| tracing::error!(interview_id = %id, "failed to cancel interview: {e}"))?;

        if !applied {
            // Another actor moved the interview first; report what it is now.
            let current = self
                .store
                .find_status(id)
                .await
                .inspect_err(|e| {
                    tracing::error!(interview_id = %id, "failed to reload interview: {e}");
                })?
                .ok_or_else(|| ExpiryError::NotFound(id.clone()))?;
            tracing::warn!(
                interview_id = %id,
                status = %current.status,
                "interview changed concurrently; expiry not applied"
            );
            return Ok(ReconcileOutcome::unchanged(current.status));
        }

        // The cancellation is committed; audit it before anything else can fail.
        tracing::info!(interview_id = %id, "interview exceeded time limit; cancelled");
        if let Some(audit) = &self.audit {
            audit.record(build_audit_event(
                id.clone(),
                record.status,
                expiry_instant(record.started_at, record.time_limit_minutes),
                now,
            ));
        }

        self.cache
            .invalidate(id)
            .await
            .inspect_err(|e| tracing::error!(interview_id = %id, "failed to invalidate cache: {e}"))?;

        Ok(ReconcileOutcome {
            cancelled: true,
            status: InterviewStatus::Cancelled,
        })
    }
}
