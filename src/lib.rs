//! # Interview Expiry
//!
//! Time-limit expiry evaluation and reconciliation for timed candidate
//! interviews.
//!
//! A candidate's interview inherits a time limit from its quiz. Views that
//! display a running interview notice locally when the limit has passed and
//! ask the reconciler to settle it. The reconciler re-reads the authoritative
//! record, re-derives expiry, and commits the `in_progress -> cancelled`
//! transition at most once, then invalidates cached views of the interview.
//!
//! ## Key Pieces
//!
//! - **Evaluator** (`core::evaluator`): pure, total expiry decisions with an
//!   explicit evaluation instant
//! - **Reconciler** (`core::Reconciler`): fresh read, decide, conditional write,
//!   cache invalidation, audit
//! - **Stores and caches** (`infra`): in-memory and Postgres backends
//! - **Trigger** (`runtime::ExpiryTrigger`): per-view re-entrancy-guarded
//!   checker with an optional tokio polling loop
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use interview_expiry::core::{InterviewId, Reconciler};
//! use interview_expiry::infra::{InMemoryInterviewStore, InMemoryViewCache};
//! use interview_expiry::util::SystemClock;
//!
//! let store = Arc::new(InMemoryInterviewStore::new());
//! let reconciler = Reconciler::new(store, InMemoryViewCache::new(), SystemClock);
//! let outcome = reconciler.reconcile(&InterviewId::from("iv-42")).await?;
//! if outcome.cancelled {
//!     // refresh the view
//! }
//! ```
//!
//! For complete scenarios, see `tests/reconciler_test.rs`.

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Expiry evaluation, reconciliation, and collaborator traits.
pub mod core;
/// Configuration models for stores, caches and auditing.
pub mod config;
/// Builders to construct reconcilers from configuration.
pub mod builders;
/// Infrastructure adapters for interview stores and view caches.
pub mod infra;
/// Runtime adapters and API surface.
pub mod runtime;
/// Shared utilities.
pub mod util;
