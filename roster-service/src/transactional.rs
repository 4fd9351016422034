//! Transactional passthrough strategy: no cache involvement.

use async_trait::async_trait;
use roster_core::{RosterResult, User, UserId};
use roster_storage::UserStore;
use std::sync::Arc;

use crate::service::UserService;

/// Every operation goes straight to the store. Serves as the throughput
/// baseline and as the ground truth the cached strategies are compared
/// against.
pub struct TransactionalService {
    store: Arc<dyn UserStore>,
}

impl TransactionalService {
    /// Create the strategy over a shared store.
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }

    /// Point lookup by id.
    pub async fn find_user(&self, id: UserId) -> RosterResult<Option<User>> {
        self.store.find_by_id(id).await
    }

    /// Multi-id lookup; unmatched ids are skipped.
    pub async fn find_users_by_ids(&self, ids: &[UserId]) -> RosterResult<Vec<User>> {
        self.store.find_by_ids(ids).await
    }

    /// The ids of every stored user, ascending.
    pub async fn user_ids(&self) -> RosterResult<Vec<UserId>> {
        let users = self.store.list_all().await?;
        Ok(users.into_iter().filter_map(|u| u.id).collect())
    }

    /// Persist a batch atomically.
    pub async fn save_users(&self, users: Vec<User>) -> RosterResult<Vec<User>> {
        self.store.save_all(users).await
    }

    /// Upsert a single user.
    pub async fn update_user(&self, user: Option<User>) -> RosterResult<User> {
        self.store.update(user).await
    }

    /// Delete a batch of ids, best-effort.
    pub async fn delete_users_by_ids(&self, ids: &[UserId]) -> RosterResult<()> {
        self.store.delete_by_ids(ids).await
    }

    /// Delete every user.
    pub async fn delete_all_users(&self) -> RosterResult<()> {
        self.store.delete_all().await
    }

    /// Number of stored users.
    pub async fn count(&self) -> RosterResult<u64> {
        self.store.count().await
    }
}

#[async_trait]
impl UserService for TransactionalService {
    async fn list_users(&self) -> RosterResult<Vec<User>> {
        self.store.list_all().await
    }

    async fn save_user(&self, user: Option<User>) -> RosterResult<User> {
        self.store.save(user).await
    }

    async fn delete_user(&self, id: Option<UserId>) -> RosterResult<()> {
        self.store.delete_by_id(id).await
    }
}
