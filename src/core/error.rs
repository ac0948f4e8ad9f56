//! Error types for expiry reconciliation.

use thiserror::Error;

use super::InterviewId;

/// Errors produced by the reconciler and its collaborators.
#[derive(Debug, Error)]
pub enum ExpiryError {
    /// No interview exists with the given identifier.
    #[error("interview not found: {0}")]
    NotFound(InterviewId),
    /// The store or cache invalidator could not be reached or updated.
    #[error("persistence failure: {0}")]
    Persistence(String),
    /// The request did not carry an authenticated actor.
    #[error("unauthenticated caller")]
    Unauthenticated,
}

impl ExpiryError {
    /// Whether the trigger may re-invoke the operation on its own schedule.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Persistence(_))
    }

    /// Wrap a backend failure with context.
    pub fn persistence(context: &str, err: impl std::fmt::Display) -> Self {
        Self::Persistence(format!("{context}: {err}"))
    }
}

/// Application-facing result using anyhow for higher-level contexts.
pub type AppResult<T> = Result<T, anyhow::Error>;
