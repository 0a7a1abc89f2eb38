//! Cache-Aside Coordinator
//!
//! Wraps a loader (the authoritative store query) with cache lookup, fill
//! and invalidation. Cache failures never reach the caller: a failed read is
//! a miss, a failed write or delete is logged and counted.
//!
//! A read that misses, loads pre-write data and fills after a concurrent
//! write has invalidated the key will leave that stale value in place until
//! its ttl runs out. Nothing here fences fills against store versions, so
//! ttl is the staleness bound for that window.

use std::future::Future;
use std::sync::Arc;

use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn};

use crate::cache::{CacheBackend, CacheStats, StatsRecorder};
use crate::error::CacheError;

// == Invalidation ==
/// One target of an invalidation request.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Invalidation {
    /// A single key
    Exact(String),
    /// Every key starting with this prefix
    Prefix(String),
}

/// What an `invalidate` call achieved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InvalidationOutcome {
    /// Entries removed across all targets
    pub removed: usize,
    /// Targets whose delete failed
    pub failed: usize,
}

// == Cache Aside ==
/// Shared coordinator handed to request handlers.
#[derive(Clone)]
pub struct CacheAside {
    backend: Arc<dyn CacheBackend>,
    stats: Arc<StatsRecorder>,
}

impl std::fmt::Debug for CacheAside {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CacheAside")
            .field("backend", &self.backend.name())
            .finish()
    }
}

impl CacheAside {
    pub fn new(backend: Arc<dyn CacheBackend>) -> Self {
        Self {
            backend,
            stats: Arc::new(StatsRecorder::new()),
        }
    }

    /// Name of the backend in use.
    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    pub fn stats(&self) -> CacheStats {
        self.stats.snapshot()
    }

    // == Fetch ==
    /// Returns the cached value for `key`, or runs `loader` and caches its
    /// `Ok` result for `ttl_secs`.
    ///
    /// Loader errors, not-found included, are returned unchanged and never
    /// cached. Concurrent misses on the same key each run the loader.
    pub async fn fetch<T, E, F, Fut>(&self, key: &str, ttl_secs: u64, loader: F) -> Result<T, E>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        if let Some(value) = self.lookup::<T>(key).await {
            self.stats.record_hit();
            debug!(key, "cache hit");
            return Ok(value);
        }

        self.stats.record_miss();
        debug!(key, "cache miss");

        let value = loader().await?;
        self.fill(key, &value, ttl_secs).await;
        Ok(value)
    }

    /// Reads and decodes `key`. Backend errors and undecodable payloads are
    /// reported as a miss.
    async fn lookup<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let decoded = match self.backend.get(key).await {
            Ok(Some(raw)) => serde_json::from_str(&raw).map_err(CacheError::from),
            Ok(None) => return None,
            Err(err) => Err(err),
        };

        match decoded {
            Ok(value) => Some(value),
            Err(err) => {
                self.stats.record_backend_error();
                warn!(key, backend = self.backend.name(), error = %err, "cache read failed, using store");
                None
            }
        }
    }

    /// Encodes and stores `value`. Failures are logged and counted only.
    async fn fill<T: Serialize>(&self, key: &str, value: &T, ttl_secs: u64) {
        let result = match serde_json::to_string(value) {
            Ok(payload) => self.backend.set(key, payload, ttl_secs).await,
            Err(err) => Err(CacheError::from(err)),
        };

        match result {
            Ok(()) => self.stats.record_fill(),
            Err(err) => {
                self.stats.record_backend_error();
                warn!(key, backend = self.backend.name(), error = %err, "cache fill failed");
            }
        }
    }

    // == Invalidate ==
    /// Purges every target. Call only after the triggering write has been
    /// confirmed by the store. Failures are logged and counted; the entries
    /// still expire through their ttl.
    pub async fn invalidate(&self, targets: &[Invalidation]) -> InvalidationOutcome {
        let mut outcome = InvalidationOutcome::default();

        for target in targets {
            let result = match target {
                Invalidation::Exact(key) => {
                    self.backend.delete_exact(key).await.map(usize::from)
                }
                Invalidation::Prefix(prefix) => self.backend.delete_by_prefix(prefix).await,
            };

            match result {
                Ok(removed) => {
                    debug!(?target, removed, "invalidated");
                    outcome.removed += removed;
                }
                Err(err) => {
                    self.stats.record_backend_error();
                    outcome.failed += 1;
                    warn!(?target, backend = self.backend.name(), error = %err, "invalidation failed");
                }
            }
        }

        self.stats.record_invalidated(outcome.removed);
        outcome
    }
}
