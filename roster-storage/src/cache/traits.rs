//! Cache backend trait and statistics.
//!
//! Backends speak bytes: serialization policy belongs to the
//! [`UserCache`](super::UserCache) facade, so any keyed byte store
//! (in-process map, Redis, LMDB) can sit behind this trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use roster_core::RosterResult;

use super::key::CacheKey;

/// Pluggable cache backend.
///
/// Implementations must be thread-safe and tolerate concurrent readers
/// and writers; the consistency strategies hit them from many workers at
/// once without external locking.
#[async_trait]
pub trait CacheBackend: Send + Sync {
    /// Get an entry and the instant it was stored, or `None` on miss.
    async fn get(&self, key: &CacheKey) -> RosterResult<Option<(Vec<u8>, DateTime<Utc>)>>;

    /// Store an entry, replacing any previous value under the key.
    async fn put(&self, key: &CacheKey, value: Vec<u8>) -> RosterResult<()>;

    /// Remove an entry. Absent keys are a no-op.
    async fn evict(&self, key: &CacheKey) -> RosterResult<()>;

    /// Remove every entry.
    async fn evict_all(&self) -> RosterResult<()>;

    /// Snapshot of usage counters.
    async fn stats(&self) -> RosterResult<CacheStats>;
}

/// Statistics about cache usage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Number of cache hits.
    pub hits: u64,
    /// Number of cache misses.
    pub misses: u64,
    /// Number of entries currently in cache.
    pub entry_count: u64,
    /// Number of explicit evictions that removed an entry.
    pub evictions: u64,
}

impl CacheStats {
    /// Calculate the hit rate (0.0 to 1.0).
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}
