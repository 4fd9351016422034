//! User store trait and the in-memory implementation.
//!
//! The store owns identity assignment and is the validation boundary for
//! incoming drafts. Point lookups report absence as `Ok(None)`, never as
//! an error.

use async_trait::async_trait;
use roster_core::{
    NullInputError, RosterResult, StorageError, User, UserId, ValidationError,
};
use std::collections::BTreeMap;
use std::sync::RwLock;

/// Async storage trait for user records.
///
/// Implementations must be safe to share across concurrent workers; the
/// service layer holds them behind `Arc` and never adds locking of its
/// own. Check-then-act sequences spanning two calls are not atomic.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// List all users ordered by ascending id.
    async fn list_all(&self) -> RosterResult<Vec<User>>;

    /// Point lookup by id.
    async fn find_by_id(&self, id: UserId) -> RosterResult<Option<User>>;

    /// Multi-id lookup. Order undefined; duplicate and unmatched ids are
    /// silently ignored.
    async fn find_by_ids(&self, ids: &[UserId]) -> RosterResult<Vec<User>>;

    /// Persist a draft, assigning its identity.
    ///
    /// Fails with `NullInputError` when the argument is absent and with
    /// `ValidationError` when a required field is missing. The identity
    /// counter advances only on success.
    async fn save(&self, user: Option<User>) -> RosterResult<User>;

    /// Persist a batch atomically: if any element fails validation, none
    /// are persisted.
    async fn save_all(&self, users: Vec<User>) -> RosterResult<Vec<User>>;

    /// Upsert: when the draft carries an id that exists, merge its fields
    /// onto the stored record (identity preserved); otherwise save.
    async fn update(&self, user: Option<User>) -> RosterResult<User>;

    /// Delete by id. No-op when the id is not present; fails with
    /// `NullInputError` when the argument is absent.
    async fn delete_by_id(&self, id: Option<UserId>) -> RosterResult<()>;

    /// Delete a batch of ids, best-effort: unmatched ids are skipped.
    async fn delete_by_ids(&self, ids: &[UserId]) -> RosterResult<()>;

    /// Delete every record.
    async fn delete_all(&self) -> RosterResult<()>;

    /// Number of stored records.
    async fn count(&self) -> RosterResult<u64>;
}

/// Check a draft for the fields the store requires.
fn validate(user: &User) -> RosterResult<()> {
    fn present(value: &Option<String>) -> bool {
        value.as_deref().is_some_and(|s| !s.is_empty())
    }

    if !present(&user.first_name) {
        return Err(ValidationError::RequiredFieldMissing {
            field: "first_name".to_string(),
        }
        .into());
    }
    if !present(&user.last_name) {
        return Err(ValidationError::RequiredFieldMissing {
            field: "last_name".to_string(),
        }
        .into());
    }
    if user.gender.is_none() {
        return Err(ValidationError::RequiredFieldMissing {
            field: "gender".to_string(),
        }
        .into());
    }
    Ok(())
}

/// Records and the id sequence live under one lock so batch saves are
/// atomic and the sequence advances only when a save succeeds.
#[derive(Debug)]
struct StoreInner {
    users: BTreeMap<UserId, User>,
    next_id: UserId,
}

/// In-memory user store.
///
/// `BTreeMap` keeps records sorted by id, so `list_all` is the natural
/// iteration order.
#[derive(Debug)]
pub struct MemoryUserStore {
    inner: RwLock<StoreInner>,
}

impl MemoryUserStore {
    /// Create an empty store with the id sequence at 1.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(StoreInner {
                users: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }
}

impl Default for MemoryUserStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn list_all(&self) -> RosterResult<Vec<User>> {
        let inner = self.inner.read().map_err(|_| StorageError::LockPoisoned)?;
        Ok(inner.users.values().cloned().collect())
    }

    async fn find_by_id(&self, id: UserId) -> RosterResult<Option<User>> {
        let inner = self.inner.read().map_err(|_| StorageError::LockPoisoned)?;
        Ok(inner.users.get(&id).cloned())
    }

    async fn find_by_ids(&self, ids: &[UserId]) -> RosterResult<Vec<User>> {
        let inner = self.inner.read().map_err(|_| StorageError::LockPoisoned)?;
        let mut found = Vec::new();
        for id in ids {
            if let Some(user) = inner.users.get(id) {
                // A duplicate id in the input must not duplicate the result.
                if found.iter().all(|u: &User| u.id != user.id) {
                    found.push(user.clone());
                }
            }
        }
        Ok(found)
    }

    async fn save(&self, user: Option<User>) -> RosterResult<User> {
        let user = user.ok_or(NullInputError::User)?;
        validate(&user)?;

        let mut inner = self.inner.write().map_err(|_| StorageError::LockPoisoned)?;
        let id = inner.next_id;
        inner.next_id += 1;
        let saved = user.with_id(id);
        inner.users.insert(id, saved.clone());
        Ok(saved)
    }

    async fn save_all(&self, users: Vec<User>) -> RosterResult<Vec<User>> {
        // Validate the whole batch before touching the map or the
        // sequence; a late failure must not leave earlier elements behind.
        for user in &users {
            validate(user)?;
        }

        let mut inner = self.inner.write().map_err(|_| StorageError::LockPoisoned)?;
        let mut saved = Vec::with_capacity(users.len());
        for user in users {
            let id = inner.next_id;
            inner.next_id += 1;
            let persisted = user.with_id(id);
            inner.users.insert(id, persisted.clone());
            saved.push(persisted);
        }
        Ok(saved)
    }

    async fn update(&self, user: Option<User>) -> RosterResult<User> {
        let user = user.ok_or(NullInputError::User)?;
        validate(&user)?;

        let mut inner = self.inner.write().map_err(|_| StorageError::LockPoisoned)?;
        if let Some(id) = user.id {
            if let Some(existing) = inner.users.get_mut(&id) {
                existing.first_name = user.first_name;
                existing.last_name = user.last_name;
                existing.gender = user.gender;
                if user.email.is_some() {
                    existing.email = user.email;
                }
                return Ok(existing.clone());
            }
        }

        // Unknown or missing id: behaves as save.
        let id = inner.next_id;
        inner.next_id += 1;
        let saved = User {
            id: Some(id),
            ..user
        };
        inner.users.insert(id, saved.clone());
        Ok(saved)
    }

    async fn delete_by_id(&self, id: Option<UserId>) -> RosterResult<()> {
        let id = id.ok_or(NullInputError::Id)?;
        let mut inner = self.inner.write().map_err(|_| StorageError::LockPoisoned)?;
        inner.users.remove(&id);
        Ok(())
    }

    async fn delete_by_ids(&self, ids: &[UserId]) -> RosterResult<()> {
        let mut inner = self.inner.write().map_err(|_| StorageError::LockPoisoned)?;
        for id in ids {
            inner.users.remove(id);
        }
        Ok(())
    }

    async fn delete_all(&self) -> RosterResult<()> {
        let mut inner = self.inner.write().map_err(|_| StorageError::LockPoisoned)?;
        inner.users.clear();
        Ok(())
    }

    async fn count(&self) -> RosterResult<u64> {
        let inner = self.inner.read().map_err(|_| StorageError::LockPoisoned)?;
        Ok(inner.users.len() as u64)
    }
}
