//! Interview store backends.

pub mod memory;
#[cfg(feature = "postgres")]
pub mod postgres;

pub use memory::InMemoryInterviewStore;
#[cfg(feature = "postgres")]
pub use postgres::PostgresInterviewStore;
