//! Typed cache facade over a byte backend.
//!
//! `UserCache` owns the serialization policy (JSON, matching what a
//! shared cache deployment would hold) and the process-wide enablement
//! switch. Strategies talk to this facade, never to a backend directly.

use roster_core::{CacheError, CacheSettings, RosterResult, User, UserId};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;

use super::key::CacheKey;
use super::traits::{CacheBackend, CacheStats};

/// Cache facade carrying the backend and the enablement switch.
///
/// When the settings disable caching, every operation is a no-op and
/// reads return `None`; the backend is never touched.
#[derive(Clone)]
pub struct UserCache {
    backend: Arc<dyn CacheBackend>,
    settings: CacheSettings,
}

impl UserCache {
    /// Create a facade over a backend with the given settings.
    pub fn new(backend: Arc<dyn CacheBackend>, settings: CacheSettings) -> Self {
        Self { backend, settings }
    }

    /// Whether the cache participates in reads and writes.
    pub fn is_enabled(&self) -> bool {
        self.settings.is_enabled()
    }

    /// The cached full-collection entry, if present.
    pub async fn get_users(&self) -> RosterResult<Option<Vec<User>>> {
        self.get_value(&CacheKey::All).await
    }

    /// Cache the full collection under the collection key.
    pub async fn put_users(&self, users: &[User]) -> RosterResult<()> {
        self.put_value(&CacheKey::All, &users).await
    }

    /// The cached per-user entry, if present.
    pub async fn get_user(&self, id: UserId) -> RosterResult<Option<User>> {
        self.get_value(&CacheKey::Id(id)).await
    }

    /// Cache a single user under its identity key.
    pub async fn put_user(&self, user: &User) -> RosterResult<()> {
        match user.id {
            Some(id) => self.put_value(&CacheKey::Id(id), user).await,
            // An unsaved draft has no identity key to live under.
            None => Ok(()),
        }
    }

    /// Remove one entry.
    pub async fn evict(&self, key: &CacheKey) -> RosterResult<()> {
        if !self.is_enabled() {
            return Ok(());
        }
        self.backend.evict(key).await
    }

    /// Remove every entry.
    pub async fn evict_all(&self) -> RosterResult<()> {
        if !self.is_enabled() {
            return Ok(());
        }
        self.backend.evict_all().await
    }

    /// Backend usage counters.
    pub async fn stats(&self) -> RosterResult<CacheStats> {
        self.backend.stats().await
    }

    async fn get_value<T: DeserializeOwned>(&self, key: &CacheKey) -> RosterResult<Option<T>> {
        if !self.is_enabled() {
            return Ok(None);
        }
        match self.backend.get(key).await? {
            Some((bytes, _stored_at)) => {
                let value =
                    serde_json::from_slice(&bytes).map_err(|e| CacheError::Deserialization {
                        reason: e.to_string(),
                    })?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    async fn put_value<T: Serialize>(&self, key: &CacheKey, value: &T) -> RosterResult<()> {
        if !self.is_enabled() {
            return Ok(());
        }
        let bytes = serde_json::to_vec(value).map_err(|e| CacheError::Serialization {
            reason: e.to_string(),
        })?;
        self.backend.put(key, bytes).await
    }
}
