//! Infrastructure adapters for interview stores and view caches.

pub mod cache;
pub mod store;

pub use cache::{InMemoryViewCache, NoopInvalidator};
pub use store::InMemoryInterviewStore;
#[cfg(feature = "postgres")]
pub use store::PostgresInterviewStore;
