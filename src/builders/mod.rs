//! Builders to construct reconcilers from configuration.

pub mod reconciler_builder;

pub use reconciler_builder::{build_reconciler, BuiltReconciler};
