//! Cache Store Module
//!
//! In-memory cache engine: a HashMap of TTL entries plus the async
//! `MemoryBackend` wrapper that shares it behind a single `RwLock`.
//! Reads take the read lock; expired entries are reclaimed by the sweep.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::cache::{CacheBackend, CacheEntry, MAX_KEY_LENGTH, MAX_VALUE_SIZE};
use crate::error::{CacheError, CacheResult};

// == Cache Store ==
/// TTL-bounded key/value map. Expired entries are never returned and are
/// removed in bulk by `cleanup_expired`.
#[derive(Debug, Default)]
pub struct CacheStore {
    entries: HashMap<String, CacheEntry>,
}

impl CacheStore {
    // == Constructor ==
    pub fn new() -> Self {
        Self::default()
    }

    // == Set ==
    /// Stores a value for `ttl` seconds, overwriting any existing entry and
    /// resetting its expiry.
    pub fn set(&mut self, key: String, value: String, ttl: u64) -> CacheResult<()> {
        if key.len() > MAX_KEY_LENGTH {
            return Err(CacheError::InvalidRequest(format!(
                "Key exceeds maximum length of {} bytes",
                MAX_KEY_LENGTH
            )));
        }

        if value.len() > MAX_VALUE_SIZE {
            return Err(CacheError::InvalidRequest(format!(
                "Value exceeds maximum size of {} bytes",
                MAX_VALUE_SIZE
            )));
        }

        if ttl == 0 {
            return Err(CacheError::InvalidRequest(
                "TTL must be at least one second".to_string(),
            ));
        }

        let entry = CacheEntry::new(value, ttl).ok_or_else(|| {
            CacheError::InvalidRequest(format!("TTL of {} seconds is out of range", ttl))
        })?;
        self.entries.insert(key, entry);
        Ok(())
    }

    // == Get ==
    /// Returns the live value for `key`. An expired entry reads as a miss
    /// and stays in place until the next sweep.
    pub fn get(&self, key: &str) -> Option<String> {
        self.entries
            .get(key)
            .filter(|entry| !entry.is_expired())
            .map(|entry| entry.value.clone())
    }

    // == Delete ==
    /// Removes an entry by key; absent keys are a no-op.
    pub fn delete(&mut self, key: &str) -> bool {
        self.entries.remove(key).is_some()
    }

    // == Delete By Prefix ==
    /// Removes every entry whose key starts with `prefix`.
    pub fn delete_prefix(&mut self, prefix: &str) -> usize {
        let before = self.entries.len();
        self.entries.retain(|key, _| !key.starts_with(prefix));
        before - self.entries.len()
    }

    // == Cleanup Expired ==
    /// Removes all expired entries from the cache.
    ///
    /// Returns the number of entries removed.
    pub fn cleanup_expired(&mut self) -> usize {
        let now = Instant::now();
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired_at(now));
        before - self.entries.len()
    }

    // == Length ==
    /// Number of entries held, including ones that expired but were not yet
    /// swept.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// == Memory Backend ==
/// `CacheBackend` over a shared `CacheStore`.
///
/// Every operation takes the lock once, so a prefix delete is observed by
/// concurrent readers either entirely or not at all.
#[derive(Debug, Clone)]
pub struct MemoryBackend {
    store: Arc<RwLock<CacheStore>>,
    namespace: String,
}

impl MemoryBackend {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            store: Arc::new(RwLock::new(CacheStore::new())),
            namespace: namespace.into(),
        }
    }

    /// Shared handle to the underlying store, used by the cleanup task.
    pub fn store(&self) -> Arc<RwLock<CacheStore>> {
        self.store.clone()
    }

    fn namespaced(&self, key: &str) -> String {
        format!("{}{}", self.namespace, key)
    }
}

#[async_trait]
impl CacheBackend for MemoryBackend {
    async fn get(&self, key: &str) -> CacheResult<Option<String>> {
        let store = self.store.read().await;
        Ok(store.get(&self.namespaced(key)))
    }

    async fn set(&self, key: &str, value: String, ttl_secs: u64) -> CacheResult<()> {
        let mut store = self.store.write().await;
        store.set(self.namespaced(key), value, ttl_secs)
    }

    async fn delete_exact(&self, key: &str) -> CacheResult<bool> {
        let mut store = self.store.write().await;
        Ok(store.delete(&self.namespaced(key)))
    }

    async fn delete_by_prefix(&self, prefix: &str) -> CacheResult<usize> {
        let mut store = self.store.write().await;
        Ok(store.delete_prefix(&self.namespaced(prefix)))
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
