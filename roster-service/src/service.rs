//! The service interface shared by every consistency strategy.

use async_trait::async_trait;
use roster_core::{RosterResult, User, UserId};

/// Logical user operations, implemented by each consistency strategy.
///
/// Store errors (validation, null input) propagate through every
/// implementation unchanged: strategies never pre-validate, wrap, or
/// retry, so callers observe the underlying error kind directly.
#[async_trait]
pub trait UserService: Send + Sync {
    /// List all users ordered by ascending id.
    async fn list_users(&self) -> RosterResult<Vec<User>>;

    /// Persist a draft and return it with its assigned identity.
    async fn save_user(&self, user: Option<User>) -> RosterResult<User>;

    /// Delete a user by id.
    async fn delete_user(&self, id: Option<UserId>) -> RosterResult<()>;
}
