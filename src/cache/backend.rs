//! Cache Backend Trait
//!
//! The key/value contract the coordinator relies on. Implementations own
//! expiry and the atomicity of group deletes; callers only see misses,
//! successes and `CacheError`s.

use async_trait::async_trait;

use crate::error::CacheResult;

/// Key/value store with per-entry expiry and prefix deletion.
///
/// Keys passed in are logical keys; each backend prepends its own namespace.
#[async_trait]
pub trait CacheBackend: Send + Sync + 'static {
    /// Returns the stored value, or `None` on a miss.
    async fn get(&self, key: &str) -> CacheResult<Option<String>>;

    /// Stores `value` under `key` for `ttl_secs` seconds, replacing any
    /// existing entry.
    async fn set(&self, key: &str, value: String, ttl_secs: u64) -> CacheResult<()>;

    /// Removes one entry. Returns whether anything was removed.
    async fn delete_exact(&self, key: &str) -> CacheResult<bool>;

    /// Removes every entry whose key starts with `prefix`, as one atomic step.
    /// Returns the number of entries removed.
    async fn delete_by_prefix(&self, prefix: &str) -> CacheResult<usize>;

    /// Short backend name used in logs.
    fn name(&self) -> &'static str;
}

// == No-op Backend ==
/// Always misses and always succeeds. Stands in when the configured backend
/// cannot be reached, so every read falls through to the store.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopBackend;

#[async_trait]
impl CacheBackend for NoopBackend {
    async fn get(&self, _key: &str) -> CacheResult<Option<String>> {
        Ok(None)
    }

    async fn set(&self, _key: &str, _value: String, _ttl_secs: u64) -> CacheResult<()> {
        Ok(())
    }

    async fn delete_exact(&self, _key: &str) -> CacheResult<bool> {
        Ok(false)
    }

    async fn delete_by_prefix(&self, _prefix: &str) -> CacheResult<usize> {
        Ok(0)
    }

    fn name(&self) -> &'static str {
        "noop"
    }
}
