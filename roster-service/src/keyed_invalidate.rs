//! Keyed-invalidate strategy: writes touch per-user cache entries only.
//!
//! The collection entry is deliberately left alone on writes, so the
//! cached list can lag the store until [`KeyedInvalidateService::reload_users`]
//! is called. That staleness window is a measured policy, not a defect:
//! it trades list freshness for avoiding a full reload on every write.

use async_trait::async_trait;
use roster_core::{RosterResult, User, UserId};
use roster_storage::{CacheKey, UserCache, UserStore};
use std::sync::Arc;
use tracing::debug;

use crate::service::UserService;

/// The fine-grained strategy.
///
/// - `save_user` writes (not evicts) the per-user entry with the saved
///   record and leaves the collection entry untouched.
/// - `delete_user` evicts the per-user entry only.
/// - `reload_users` is the single point that evicts the collection entry.
pub struct KeyedInvalidateService {
    store: Arc<dyn UserStore>,
    cache: UserCache,
}

impl KeyedInvalidateService {
    /// Create the strategy over a shared store and cache.
    pub fn new(store: Arc<dyn UserStore>, cache: UserCache) -> Self {
        Self { store, cache }
    }

    /// Drop the cached collection so the next `list_users` re-reads the
    /// store. This is the only way the list cache refreshes after writes
    /// under this policy.
    pub async fn reload_users(&self) -> RosterResult<()> {
        if self.cache.is_enabled() {
            self.cache.evict(&CacheKey::All).await?;
            debug!("collection cache evicted on reload");
        }
        Ok(())
    }

    /// The per-user cache entry, if one is present.
    pub async fn find_cached(&self, id: UserId) -> RosterResult<Option<User>> {
        self.cache.get_user(id).await
    }
}

#[async_trait]
impl UserService for KeyedInvalidateService {
    async fn list_users(&self) -> RosterResult<Vec<User>> {
        if self.cache.is_enabled() {
            if let Some(users) = self.cache.get_users().await? {
                debug!(count = users.len(), "list_users served from cache");
                return Ok(users);
            }
        }

        let users = self.store.list_all().await?;
        if self.cache.is_enabled() {
            self.cache.put_users(&users).await?;
            debug!(count = users.len(), "list_users cached");
        }
        Ok(users)
    }

    async fn save_user(&self, user: Option<User>) -> RosterResult<User> {
        let saved = self.store.save(user).await?;
        if self.cache.is_enabled() {
            // Keep the per-user entry warm; the collection entry is
            // allowed to go stale until an explicit reload.
            self.cache.put_user(&saved).await?;
            debug!(id = ?saved.id, "per-user cache entry written after save");
        }
        Ok(saved)
    }

    async fn delete_user(&self, id: Option<UserId>) -> RosterResult<()> {
        self.store.delete_by_id(id).await?;
        if self.cache.is_enabled() {
            if let Some(id) = id {
                self.cache.evict(&CacheKey::Id(id)).await?;
                debug!(id, "per-user cache entry evicted after delete");
            }
        }
        Ok(())
    }
}
