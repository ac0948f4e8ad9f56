//! Cache invalidation backends.

pub mod memory;

pub use memory::InMemoryViewCache;

use async_trait::async_trait;

use crate::core::{CacheInvalidator, ExpiryError, InterviewId};

/// Invalidator for deployments without a view cache.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopInvalidator;

#[async_trait]
impl CacheInvalidator for NoopInvalidator {
    async fn invalidate(&self, _id: &InterviewId) -> Result<(), ExpiryError> {
        Ok(())
    }
}
