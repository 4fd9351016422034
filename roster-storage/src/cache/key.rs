//! Composite cache keys.

use roster_core::UserId;
use std::fmt;

/// Literal token under which the full user collection is cached.
pub const ALL_USERS_KEY: &str = "all";

/// A cache key: either the full-collection token or a per-user key.
///
/// At most one entry exists per distinct key at any time; the backend is
/// a plain map from the encoded form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheKey {
    /// The cached `list_all` result.
    All,
    /// A single user by identity.
    Id(UserId),
}

impl CacheKey {
    /// Canonical string form used by backends.
    pub fn encode(&self) -> String {
        match self {
            CacheKey::All => ALL_USERS_KEY.to_string(),
            CacheKey::Id(id) => format!("user:{}", id),
        }
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.encode())
    }
}
