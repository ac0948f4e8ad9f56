//! Wire a reconciler from [`ReconcilerConfig`].

use std::sync::Arc;

use crate::config::{CacheBackendConfig, ReconcilerConfig, StoreBackendConfig};
use crate::core::{
    AppResult, AuditSink, CacheInvalidator, InMemoryAuditSink, InterviewStore, Reconciler,
    TracingAuditSink,
};
use crate::infra::{InMemoryInterviewStore, InMemoryViewCache, NoopInvalidator};
use crate::util::clock::SystemClock;

/// Reconciler assembled from configuration, with type-erased collaborators.
pub struct BuiltReconciler {
    /// The reconciler itself.
    pub reconciler: Reconciler<Arc<dyn InterviewStore>, Arc<dyn CacheInvalidator>, SystemClock>,
    /// In-memory audit buffer, when `audit_capacity > 0`.
    pub audit: Option<Arc<InMemoryAuditSink>>,
}

/// Build a reconciler from configuration.
///
/// The in-memory audit buffer is attached when `audit_capacity > 0`;
/// otherwise cancellations are audited through `tracing`.
///
/// # Errors
///
/// Invalid configuration, or a backend that cannot be constructed. These are
/// setup failures, never the retryable `ExpiryError::Persistence`.
pub fn build_reconciler(cfg: &ReconcilerConfig) -> AppResult<BuiltReconciler> {
    cfg.validate()
        .map_err(|e| anyhow::anyhow!("config invalid: {e}"))?;

    let store: Arc<dyn InterviewStore> = match cfg.store {
        StoreBackendConfig::InMemory => Arc::new(InMemoryInterviewStore::new()),
        StoreBackendConfig::Postgres => postgres_store(cfg)?,
    };
    let cache: Arc<dyn CacheInvalidator> = match cfg.cache {
        CacheBackendConfig::None => Arc::new(NoopInvalidator),
        CacheBackendConfig::InMemory => Arc::new(InMemoryViewCache::new()),
    };

    let audit = (cfg.audit_capacity > 0).then(|| Arc::new(InMemoryAuditSink::new(cfg.audit_capacity)));
    let sink: Arc<dyn AuditSink> = match &audit {
        Some(buffer) => buffer.clone(),
        None => Arc::new(TracingAuditSink),
    };

    tracing::info!(store = ?cfg.store, cache = ?cfg.cache, "reconciler built");
    Ok(BuiltReconciler {
        reconciler: Reconciler::new(store, cache, SystemClock).with_audit(sink),
        audit,
    })
}

#[cfg(feature = "postgres")]
fn postgres_store(cfg: &ReconcilerConfig) -> AppResult<Arc<dyn InterviewStore>> {
    use anyhow::Context;

    let url = cfg
        .database_url
        .as_deref()
        .context("database_url missing")?;
    let store = crate::infra::PostgresInterviewStore::connect(url, cfg.pool_max_size)
        .map_err(|e| anyhow::anyhow!("failed to configure postgres interview store: {e}"))?;
    Ok(Arc::new(store))
}

#[cfg(not(feature = "postgres"))]
fn postgres_store(_cfg: &ReconcilerConfig) -> AppResult<Arc<dyn InterviewStore>> {
    anyhow::bail!("postgres store requires the `postgres` feature")
}
