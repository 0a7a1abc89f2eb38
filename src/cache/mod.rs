//! Cache Module
//!
//! Cache-aside layer: key naming, backends with TTL and prefix deletion, and
//! the coordinator that request handlers go through.

mod backend;
mod coordinator;
mod entry;
pub mod keys;
mod redis_backend;
mod stats;
mod store;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use backend::{CacheBackend, NoopBackend};
pub use coordinator::{CacheAside, Invalidation, InvalidationOutcome};
pub use entry::CacheEntry;
pub use keys::{EntityKind, Page};
pub use redis_backend::RedisBackend;
pub use stats::{CacheStats, StatsRecorder};
pub use store::{CacheStore, MemoryBackend};

// == Public Constants ==
/// Maximum allowed key length in bytes, namespace included
pub const MAX_KEY_LENGTH: usize = 256;

/// Maximum allowed value size in bytes
pub const MAX_VALUE_SIZE: usize = 1024 * 1024; // 1 MB
