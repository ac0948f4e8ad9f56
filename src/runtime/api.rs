//! Request/response surface exposed to reconcile triggers.

use serde::{Deserialize, Serialize};

use crate::core::{
    CacheInvalidator, ExpiryError, InterviewId, InterviewStatus, InterviewStore, Reconciler,
};
use crate::util::clock::Clock;

/// Authenticated caller, as established by the host's session layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// Actor identifier.
    pub id: String,
}

/// Reconcile request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconcileRequest {
    /// Interview to reconcile.
    pub interview_id: InterviewId,
}

/// Reconcile reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ReconcileReply {
    /// Reconciliation ran.
    Ok {
        /// Whether this call cancelled the interview.
        cancelled: bool,
        /// Resulting status.
        status: InterviewStatus,
    },
    /// Unknown interview.
    NotFound {
        /// Requested identifier.
        interview_id: InterviewId,
    },
    /// No authenticated actor on the request.
    Unauthenticated,
    /// Backend failure; the trigger may retry on its next poll.
    Failure {
        /// Generic message safe to show the caller.
        message: String,
        /// Whether retrying can help.
        retryable: bool,
    },
}

impl ReconcileReply {
    /// HTTP-equivalent status code.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Ok { .. } => 200,
            Self::NotFound { .. } => 404,
            Self::Unauthenticated => 401,
            Self::Failure { retryable: true, .. } => 503,
            Self::Failure { retryable: false, .. } => 500,
        }
    }
}

impl From<ExpiryError> for ReconcileReply {
    fn from(err: ExpiryError) -> Self {
        match err {
            ExpiryError::NotFound(interview_id) => Self::NotFound { interview_id },
            ExpiryError::Unauthenticated => Self::Unauthenticated,
            err @ ExpiryError::Persistence(_) => Self::Failure {
                message: "failed to check interview status".into(),
                retryable: err.is_retryable(),
            },
        }
    }
}

/// Health response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Health {
    /// Healthy flag.
    pub ok: bool,
}

/// Handle one reconcile request from an authenticated trigger.
pub async fn handle_reconcile<S, C, K>(
    reconciler: &Reconciler<S, C, K>,
    actor: Option<&Actor>,
    req: ReconcileRequest,
) -> ReconcileReply
where
    S: InterviewStore,
    C: CacheInvalidator,
    K: Clock,
{
    let Some(actor) = actor else {
        tracing::warn!(interview_id = %req.interview_id, "reconcile rejected: unauthenticated");
        return ExpiryError::Unauthenticated.into();
    };
    match reconciler.reconcile(&req.interview_id).await {
        Ok(outcome) => ReconcileReply::Ok {
            cancelled: outcome.cancelled,
            status: outcome.status,
        },
        Err(err) => {
            tracing::warn!(
                interview_id = %req.interview_id,
                actor = %actor.id,
                "reconcile failed: {err}"
            );
            err.into()
        }
    }
}

/// Return a health payload.
#[must_use]
pub const fn health() -> Health {
    Health { ok: true }
}
