//! Bulk-invalidate strategy: any write clears the cached collection.

use async_trait::async_trait;
use roster_core::{RosterResult, User, UserId};
use roster_storage::{CacheKey, UserCache, UserStore};
use std::sync::Arc;
use tracing::debug;

use crate::service::UserService;

/// The coarse strategy: `list_users` reads through the cache under the
/// collection key, and every write evicts that key regardless of which
/// user changed. Simple to reason about, pays a full list reload after
/// each write.
pub struct BulkInvalidateService {
    store: Arc<dyn UserStore>,
    cache: UserCache,
}

impl BulkInvalidateService {
    /// Create the strategy over a shared store and cache.
    pub fn new(store: Arc<dyn UserStore>, cache: UserCache) -> Self {
        Self { store, cache }
    }
}

#[async_trait]
impl UserService for BulkInvalidateService {
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
            self.cache.evict(&CacheKey::All).await?;
            debug!(id = ?saved.id, "collection cache evicted after save");
        }
        Ok(saved)
    }

    async fn delete_user(&self, id: Option<UserId>) -> RosterResult<()> {
        self.store.delete_by_id(id).await?;
        if self.cache.is_enabled() {
            self.cache.evict(&CacheKey::All).await?;
            debug!(?id, "collection cache evicted after delete");
        }
        Ok(())
    }
}
