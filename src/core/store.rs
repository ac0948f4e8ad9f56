//! Collaborator seams: the authoritative interview store and the view cache.

use std::sync::Arc;

use async_trait::async_trait;

use super::{ExpiryError, InterviewId, InterviewRecord, InterviewStatus};

/// Authoritative persistence for interview status.
#[async_trait]
pub trait InterviewStore: Send + Sync {
    /// Freshly load the fields the expiry core needs, or `None` if unknown.
    async fn find_status(&self, id: &InterviewId)
        -> Result<Option<InterviewRecord>, ExpiryError>;

    /// Unconditionally overwrite the status of one interview.
    async fn set_status(&self, id: &InterviewId, status: InterviewStatus)
        -> Result<(), ExpiryError>;

    /// Cancel the interview only if it is still running.
    ///
    /// Returns `true` when this call performed the transition. Backends
    /// without conditional writes fall back to an unconditional write, which
    /// is safe because the target state is idempotent.
    async fn cancel_if_in_progress(&self, id: &InterviewId) -> Result<bool, ExpiryError> {
        self.set_status(id, InterviewStatus::Cancelled).await?;
        Ok(true)
    }
}

/// Invalidates cached representations of an interview.
#[async_trait]
pub trait CacheInvalidator: Send + Sync {
    /// Drop any cached view of `id` so the next read is fresh.
    async fn invalidate(&self, id: &InterviewId) -> Result<(), ExpiryError>;
}

#[async_trait]
impl<S: InterviewStore + ?Sized> InterviewStore for Arc<S> {
    async fn find_status(
        &self,
        id: &InterviewId,
    ) -> Result<Option<InterviewRecord>, ExpiryError> {
        (**self).find_status(id).await
    }

    async fn set_status(
        &self,
        id: &InterviewId,
        status: InterviewStatus,
    ) -> Result<(), ExpiryError> {
        (**self).set_status(id, status).await
    }

    async fn cancel_if_in_progress(&self, id: &InterviewId) -> Result<bool, ExpiryError> {
        (**self).cancel_if_in_progress(id).await
    }
}

#[async_trait]
impl<C: CacheInvalidator + ?Sized> CacheInvalidator for Arc<C> {
    async fn invalidate(&self, id: &InterviewId) -> Result<(), ExpiryError> {
        (**self).invalidate(id).await
    }
}
