//! In-memory interview view cache.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::core::{CacheInvalidator, ExpiryError, InterviewId, InterviewRecord};

/// Read-side cache of rendered interview views.
///
/// Views are populated by whoever renders them; the reconciler only evicts.
#[derive(Default)]
pub struct InMemoryViewCache {
    views: RwLock<HashMap<InterviewId, InterviewRecord>>,
    invalidations: AtomicUsize,
}

impl InMemoryViewCache {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Cache a view of an interview.
    pub fn put(&self, record: InterviewRecord) {
        self.views.write().insert(record.id.clone(), record);
    }

    /// Cached view, if present.
    #[must_use]
    pub fn get(&self, id: &InterviewId) -> Option<InterviewRecord> {
        self.views.read().get(id).cloned()
    }

    /// Number of invalidations received.
    pub fn invalidation_count(&self) -> usize {
        self.invalidations.load(Ordering::Acquire)
    }
}

#[async_trait]
impl CacheInvalidator for InMemoryViewCache {
    async fn invalidate(&self, id: &InterviewId) -> Result<(), ExpiryError> {
        self.views.write().remove(id);
        self.invalidations.fetch_add(1, Ordering::AcqRel);
        tracing::debug!(interview_id = %id, "interview view invalidated");
        Ok(())
    }
}
