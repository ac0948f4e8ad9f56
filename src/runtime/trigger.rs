//! Client-side expiry trigger.
//!
//! Holds the interview snapshot a view was rendered with, decides locally
//! whether asking the reconciler is worthwhile, and guards against issuing a
//! second reconcile while one is outstanding. The snapshot is only a
//! heuristic; the reconciler re-reads authoritative state.

use std::sync::atomic::{AtomicBool, Ordering};
#[cfg(feature = "tokio-runtime")]
use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::core::evaluator::is_expired;
use crate::core::{CacheInvalidator, InterviewId, InterviewStatus, InterviewStore, Reconciler};
use crate::runtime::api::{handle_reconcile, Actor, ReconcileReply, ReconcileRequest};
use crate::util::clock::Clock;

/// Interview fields known to the view at render time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterviewSnapshot {
    /// Interview identifier.
    pub interview_id: InterviewId,
    /// Status at render time.
    pub status: InterviewStatus,
    /// Start instant at render time.
    pub started_at: Option<DateTime<Utc>>,
    /// Time limit at render time.
    pub time_limit_minutes: Option<i32>,
}

/// What the trigger did on one check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerAction {
    /// Locally not expired, or not running; nothing asked.
    Idle,
    /// A reconcile for this interview is already outstanding.
    InFlight,
    /// The interview reached a terminal status; the view should refresh.
    Refresh(InterviewStatus),
    /// The reconciler left the interview running.
    Unchanged(InterviewStatus),
    /// Retryable failure; the next poll will ask again.
    Failed,
    /// The reconciler will never succeed for this request (unknown id or unauthenticated).
    Abandoned,
}

/// Per-view expiry trigger.
pub struct ExpiryTrigger {
    snapshot: Mutex<InterviewSnapshot>,
    in_flight: AtomicBool,
}

struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl ExpiryTrigger {
    /// Create a trigger for a rendered snapshot.
    #[must_use]
    pub fn new(snapshot: InterviewSnapshot) -> Self {
        Self {
            snapshot: Mutex::new(snapshot),
            in_flight: AtomicBool::new(false),
        }
    }

    /// Current local snapshot.
    #[must_use]
    pub fn snapshot(&self) -> InterviewSnapshot {
        self.snapshot.lock().clone()
    }

    /// Whether the local snapshot says the interview ran out of time at `now`.
    #[must_use]
    pub fn should_reconcile(&self, now: DateTime<Utc>) -> bool {
        let (status, started_at, time_limit_minutes) = {
            let snapshot = self.snapshot.lock();
            (snapshot.status, snapshot.started_at, snapshot.time_limit_minutes)
        };
        status == InterviewStatus::InProgress
            && is_expired(started_at, None, time_limit_minutes, now)
    }

    /// Check once at `now`, invoking the reconciler if the snapshot looks expired.
    pub async fn check<S, C, K>(
        &self,
        reconciler: &Reconciler<S, C, K>,
        actor: &Actor,
        now: DateTime<Utc>,
    ) -> TriggerAction
    where
        S: InterviewStore,
        C: CacheInvalidator,
        K: Clock,
    {
        if !self.should_reconcile(now) {
            return TriggerAction::Idle;
        }
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return TriggerAction::InFlight;
        }
        let _guard = InFlightGuard(&self.in_flight);

        let interview_id = self.snapshot.lock().interview_id.clone();
        let reply = handle_reconcile(reconciler, Some(actor), ReconcileRequest { interview_id }).await;

        match reply {
            ReconcileReply::Ok { status, .. } if status.is_terminal() => {
                self.snapshot.lock().status = status;
                TriggerAction::Refresh(status)
            }
            ReconcileReply::Ok { status, .. } => TriggerAction::Unchanged(status),
            ReconcileReply::Failure { retryable: true, .. } => TriggerAction::Failed,
            ReconcileReply::Failure { .. }
            | ReconcileReply::NotFound { .. }
            | ReconcileReply::Unauthenticated => TriggerAction::Abandoned,
        }
    }

    /// Poll every `period` on `spawner` until the interview is terminal or
    /// the request is abandoned.
    ///
    /// The receiver resolves with the terminal status; it is dropped without
    /// a value when polling is abandoned. Dropping the receiver stops polling.
    #[cfg(feature = "tokio-runtime")]
    pub fn spawn_polling<S, C, K, Sp>(
        self: Arc<Self>,
        reconciler: Arc<Reconciler<S, C, K>>,
        actor: Actor,
        period: std::time::Duration,
        spawner: &Sp,
    ) -> tokio::sync::oneshot::Receiver<InterviewStatus>
    where
        S: InterviewStore + 'static,
        C: CacheInvalidator + 'static,
        K: Clock + 'static,
        Sp: crate::runtime::Spawn,
    {
        let (tx, rx) = tokio::sync::oneshot::channel();
        spawner.spawn(async move {
            let mut ticker = tokio::time::interval(period);
            loop {
                ticker.tick().await;
                if tx.is_closed() {
                    return;
                }
                let now = reconciler.clock().now();
                match self.check(&reconciler, &actor, now).await {
                    TriggerAction::Refresh(status) => {
                        let _ = tx.send(status);
                        return;
                    }
                    TriggerAction::Abandoned => return,
                    TriggerAction::Failed => {
                        tracing::debug!("expiry check failed; retrying next poll");
                    }
                    TriggerAction::Idle | TriggerAction::InFlight | TriggerAction::Unchanged(_) => {}
                }
            }
        });
        rx
    }
}
