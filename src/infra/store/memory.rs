//! In-memory interview store for development and testing.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;

use crate::core::{ExpiryError, InterviewId, InterviewRecord, InterviewStatus, InterviewStore};

/// Interview store backed by a mutex-protected map.
///
/// Besides the store contract it exposes the lifecycle actions owned by
/// other flows (invite, start, complete) so callers can stage records.
#[derive(Default)]
pub struct InMemoryInterviewStore {
    records: Mutex<HashMap<InterviewId, InterviewRecord>>,
    writes: AtomicUsize,
}

impl InMemoryInterviewStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a record.
    pub fn insert(&self, record: InterviewRecord) {
        self.records.lock().insert(record.id.clone(), record);
    }

    /// Snapshot a record.
    #[must_use]
    pub fn get(&self, id: &InterviewId) -> Option<InterviewRecord> {
        self.records.lock().get(id).cloned()
    }

    /// Mark a pending interview as started at `at`. Started or terminal records are left untouched.
    ///
    /// # Errors
    ///
    /// `NotFound` for unknown ids.
    pub fn start(&self, id: &InterviewId, at: DateTime<Utc>) -> Result<(), ExpiryError> {
        let mut records = self.records.lock();
        let record = records
            .get_mut(id)
            .ok_or_else(|| ExpiryError::NotFound(id.clone()))?;
        if record.status == InterviewStatus::Pending && record.started_at.is_none() {
            record.started_at = Some(at);
            record.status = InterviewStatus::InProgress;
        }
        Ok(())
    }

    /// Mark a running interview as completed at `at`. Terminal records are left untouched.
    ///
    /// # Errors
    ///
    /// `NotFound` for unknown ids.
    pub fn complete(&self, id: &InterviewId, at: DateTime<Utc>) -> Result<(), ExpiryError> {
        let mut records = self.records.lock();
        let record = records
            .get_mut(id)
            .ok_or_else(|| ExpiryError::NotFound(id.clone()))?;
        if !record.status.is_terminal() {
            record.completed_at = Some(at);
            record.status = InterviewStatus::Completed;
        }
        Ok(())
    }

    /// Number of status writes issued through the store contract.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::Acquire)
    }
}

#[async_trait]
impl InterviewStore for InMemoryInterviewStore {
    async fn find_status(
        &self,
        id: &InterviewId,
    ) -> Result<Option<InterviewRecord>, ExpiryError> {
        Ok(self.get(id))
    }

    async fn set_status(
        &self,
        id: &InterviewId,
        status: InterviewStatus,
    ) -> Result<(), ExpiryError> {
        let mut records = self.records.lock();
        let record = records
            .get_mut(id)
            .ok_or_else(|| ExpiryError::NotFound(id.clone()))?;
        record.status = status;
        self.writes.fetch_add(1, Ordering::AcqRel);
        Ok(())
    }

    async fn cancel_if_in_progress(&self, id: &InterviewId) -> Result<bool, ExpiryError> {
        let mut records = self.records.lock();
        let record = records
            .get_mut(id)
            .ok_or_else(|| ExpiryError::NotFound(id.clone()))?;
        if record.status != InterviewStatus::InProgress || record.completed_at.is_some() {
            return Ok(false);
        }
        record.status = InterviewStatus::Cancelled;
        self.writes.fetch_add(1, Ordering::AcqRel);
        Ok(true)
    }
}
