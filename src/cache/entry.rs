//! Cache Entry Module
//!
//! A serialized value paired with the instant it stops being servable.

use std::time::{Duration, Instant};

// == Cache Entry ==
/// One `(value, expiry)` pair held by the memory backend.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// Serialized payload
    pub value: String,
    /// Monotonic instant after which the entry is gone
    pub expires_at: Instant,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates an entry that lives for `ttl_seconds` from now, or `None` if
    /// that instant cannot be represented.
    pub fn new(value: String, ttl_seconds: u64) -> Option<Self> {
        let expires_at = Instant::now().checked_add(Duration::from_secs(ttl_seconds))?;
        Some(Self { value, expires_at })
    }

    // == Is Expired ==
    /// An entry is expired once the current instant reaches its expiry.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Instant::now())
    }

    pub fn is_expired_at(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}
