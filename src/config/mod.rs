//! Configuration models for stores, caches and auditing.

pub mod reconciler;

pub use reconciler::{CacheBackendConfig, ReconcilerConfig, StoreBackendConfig};
