//! Expiry evaluation, reconciliation and the collaborator seams they use.

pub mod audit;
pub mod error;
pub mod evaluator;
pub mod interview;
pub mod reconciler;
pub mod store;

pub use audit::{build_audit_event, AuditSink, ExpiryAuditEvent, InMemoryAuditSink, TracingAuditSink};
pub use error::{AppResult, ExpiryError};
pub use evaluator::{expiry_instant, is_expired, remaining};
pub use interview::{InterviewId, InterviewRecord, InterviewStatus};
pub use reconciler::{ReconcileOutcome, Reconciler};
pub use store::{CacheInvalidator, InterviewStore};
