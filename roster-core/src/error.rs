//! Error types for Roster operations

use thiserror::Error;

/// Validation errors raised at the store boundary.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required field missing: {field}")]
    RequiredFieldMissing { field: String },
}

/// Absent-argument errors for mutating operations.
///
/// Drafts and ids arrive through an optional binding layer; the store is
/// the boundary that rejects absent inputs, and strategies propagate the
/// error kind unchanged so callers can observe it.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum NullInputError {
    #[error("User argument was absent")]
    User,

    #[error("Id argument was absent")]
    Id,
}

/// Store-internal failures.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StorageError {
    #[error("Storage lock poisoned")]
    LockPoisoned,
}

/// Cache layer failures.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CacheError {
    #[error("Serialization failed: {reason}")]
    Serialization { reason: String },

    #[error("Deserialization failed: {reason}")]
    Deserialization { reason: String },

    #[error("Cache lock poisoned")]
    LockPoisoned,
}

/// Master error type for all Roster operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RosterError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Null input: {0}")]
    NullInput(#[from] NullInputError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Cache error: {0}")]
    Cache(#[from] CacheError),
}

/// Result type alias for Roster operations.
pub type RosterResult<T> = Result<T, RosterError>;
