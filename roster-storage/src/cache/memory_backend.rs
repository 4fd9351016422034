//! In-process cache backend.
//!
//! A map from encoded key to serialized bytes, guarded by a `RwLock`.
//! Lock scope never spans an await point, so the synchronous lock is safe
//! under the async trait surface.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use roster_core::{CacheError, RosterResult};
use std::collections::HashMap;
use std::sync::RwLock;

use super::key::CacheKey;
use super::traits::{CacheBackend, CacheStats};

/// Hit/miss/eviction counters; entry count is derived from the map.
#[derive(Debug, Default)]
struct Counters {
    hits: u64,
    misses: u64,
    evictions: u64,
}

/// In-memory cache backend.
#[derive(Debug, Default)]
pub struct MemoryCacheBackend {
    entries: RwLock<HashMap<String, (Vec<u8>, DateTime<Utc>)>>,
    counters: RwLock<Counters>,
}

impl MemoryCacheBackend {
    /// Create an empty backend.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CacheBackend for MemoryCacheBackend {
    async fn get(&self, key: &CacheKey) -> RosterResult<Option<(Vec<u8>, DateTime<Utc>)>> {
        let entries = self.entries.read().map_err(|_| CacheError::LockPoisoned)?;
        let found = entries.get(&key.encode()).cloned();
        drop(entries);

        let mut counters = self.counters.write().map_err(|_| CacheError::LockPoisoned)?;
        if found.is_some() {
            counters.hits += 1;
        } else {
            counters.misses += 1;
        }
        Ok(found)
    }

    async fn put(&self, key: &CacheKey, value: Vec<u8>) -> RosterResult<()> {
        let mut entries = self.entries.write().map_err(|_| CacheError::LockPoisoned)?;
        entries.insert(key.encode(), (value, Utc::now()));
        Ok(())
    }

    async fn evict(&self, key: &CacheKey) -> RosterResult<()> {
        let mut entries = self.entries.write().map_err(|_| CacheError::LockPoisoned)?;
        let removed = entries.remove(&key.encode()).is_some();
        drop(entries);

        if removed {
            let mut counters = self.counters.write().map_err(|_| CacheError::LockPoisoned)?;
            counters.evictions += 1;
        }
        Ok(())
    }

    async fn evict_all(&self) -> RosterResult<()> {
        let mut entries = self.entries.write().map_err(|_| CacheError::LockPoisoned)?;
        let removed = entries.len() as u64;
        entries.clear();
        drop(entries);

        let mut counters = self.counters.write().map_err(|_| CacheError::LockPoisoned)?;
        counters.evictions += removed;
        Ok(())
    }

    async fn stats(&self) -> RosterResult<CacheStats> {
        let entries = self.entries.read().map_err(|_| CacheError::LockPoisoned)?;
        let counters = self.counters.read().map_err(|_| CacheError::LockPoisoned)?;
        Ok(CacheStats {
            hits: counters.hits,
            misses: counters.misses,
            entry_count: entries.len() as u64,
            evictions: counters.evictions,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_put_get_round_trip() {
        let backend = MemoryCacheBackend::new();
        backend
            .put(&CacheKey::Id(1), b"payload".to_vec())
            .await
            .unwrap();

        let (value, _stored_at) = backend.get(&CacheKey::Id(1)).await.unwrap().unwrap();
        assert_eq!(value, b"payload");
    }

    #[tokio::test]
    async fn test_put_replaces_previous_value() {
        let backend = MemoryCacheBackend::new();
        backend.put(&CacheKey::All, b"old".to_vec()).await.unwrap();
        backend.put(&CacheKey::All, b"new".to_vec()).await.unwrap();

        let (value, _) = backend.get(&CacheKey::All).await.unwrap().unwrap();
        assert_eq!(value, b"new");
        assert_eq!(backend.stats().await.unwrap().entry_count, 1);
    }

    #[tokio::test]
    async fn test_evict_absent_key_is_noop() {
        let backend = MemoryCacheBackend::new();
        backend.evict(&CacheKey::Id(9)).await.unwrap();
        assert_eq!(backend.stats().await.unwrap().evictions, 0);
    }

    #[tokio::test]
    async fn test_evict_all_clears_entries() {
        let backend = MemoryCacheBackend::new();
        backend.put(&CacheKey::All, b"a".to_vec()).await.unwrap();
        backend.put(&CacheKey::Id(1), b"b".to_vec()).await.unwrap();

        backend.evict_all().await.unwrap();
        let stats = backend.stats().await.unwrap();
        assert_eq!(stats.entry_count, 0);
        assert_eq!(stats.evictions, 2);
    }

    #[tokio::test]
    async fn test_stats_track_hits_and_misses() {
        let backend = MemoryCacheBackend::new();
        backend.put(&CacheKey::Id(1), b"x".to_vec()).await.unwrap();

        backend.get(&CacheKey::Id(1)).await.unwrap();
        backend.get(&CacheKey::Id(2)).await.unwrap();
        backend.get(&CacheKey::Id(1)).await.unwrap();

        let stats = backend.stats().await.unwrap();
        assert_eq!(stats.hits, 2);
        assert_eq!(stats.misses, 1);
        assert!((stats.hit_rate() - 2.0 / 3.0).abs() < 0.001);
    }
}
