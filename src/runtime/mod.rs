//! Runtime adapters and the API surface exposed to triggers.

pub mod api;
#[cfg(feature = "tokio-runtime")]
pub mod tokio_spawner;
pub mod trigger;

pub use api::{handle_reconcile, health, Actor, Health, ReconcileReply, ReconcileRequest};
#[cfg(feature = "tokio-runtime")]
pub use tokio_spawner::{Spawn, TokioSpawner};
pub use trigger::{ExpiryTrigger, InterviewSnapshot, TriggerAction};
