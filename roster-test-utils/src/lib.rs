//! Roster Test Utilities
//!
//! Centralized test infrastructure for the Roster workspace:
//! - Canonical user fixtures shared by every strategy suite
//! - Store seeding helpers
//! - Proptest generators for valid users

// Re-export core types for convenience
pub use roster_core::{
    CacheMode, CacheSettings, Gender, NullInputError, RosterError, RosterResult, User, UserId,
    ValidationError,
};
pub use roster_storage::{MemoryCacheBackend, MemoryUserStore, UserCache, UserStore};

use proptest::prelude::*;

// ============================================================================
// FIXTURES
// ============================================================================

/// Unsaved draft for Alice Smith.
pub fn user_to_save_1() -> User {
    User::new("Alice", "Smith", Gender::Female)
}

/// Unsaved draft for Bob Johnson.
pub fn user_to_save_2() -> User {
    User::new("Bob", "Johnson", Gender::Male)
}

/// Unsaved draft for Terry Jerry.
pub fn user_to_save_3() -> User {
    User::new("Terry", "Jerry", Gender::AttackHelicopter)
}

/// Alice as the store returns her after seeding first.
pub fn persisted_user_1() -> User {
    user_to_save_1()
        .with_id(1)
        .with_email("alice.smith@example.com")
}

/// Bob as the store returns him after seeding second.
pub fn persisted_user_2() -> User {
    user_to_save_2()
        .with_id(2)
        .with_email("bob.johnson@example.com")
}

/// Terry as the store returns them after seeding third.
pub fn persisted_user_3() -> User {
    user_to_save_3()
        .with_id(3)
        .with_email("terry.jerry@example.com")
}

/// Draft rejected for its missing first name.
pub fn user_without_first_name() -> User {
    User {
        id: None,
        first_name: None,
        last_name: Some("Giggles".to_string()),
        gender: Some(Gender::Other),
        email: None,
    }
}

/// Draft rejected for its missing last name.
pub fn user_without_last_name() -> User {
    User {
        id: None,
        first_name: Some("Chuckles".to_string()),
        last_name: None,
        gender: Some(Gender::Other),
        email: None,
    }
}

/// Draft rejected for its missing gender.
pub fn user_without_gender() -> User {
    User {
        id: None,
        first_name: Some("Riddle".to_string()),
        last_name: Some("Riddle".to_string()),
        gender: None,
        email: None,
    }
}

// ============================================================================
// SEEDING
// ============================================================================

/// Save the three canonical users in order, yielding ids 1, 2, 3.
pub async fn seed_users(store: &dyn UserStore) -> RosterResult<Vec<User>> {
    let mut saved = Vec::with_capacity(3);
    for draft in [
        user_to_save_1().with_email("alice.smith@example.com"),
        user_to_save_2().with_email("bob.johnson@example.com"),
        user_to_save_3().with_email("terry.jerry@example.com"),
    ] {
        saved.push(store.save(Some(draft)).await?);
    }
    Ok(saved)
}

// ============================================================================
// PROPTEST GENERATORS
// ============================================================================

/// Any gender variant.
pub fn arb_gender() -> impl Strategy<Value = Gender> {
    prop_oneof![
        Just(Gender::Male),
        Just(Gender::Female),
        Just(Gender::AttackHelicopter),
        Just(Gender::Other),
    ]
}

/// A draft that passes store validation: non-empty names, a gender, and
/// an optional email.
pub fn arb_valid_user() -> impl Strategy<Value = User> {
    (
        "[A-Za-z]{1,12}",
        "[A-Za-z]{1,12}",
        arb_gender(),
        proptest::option::of("[a-z]{1,8}@example\\.com"),
    )
        .prop_map(|(first, last, gender, email)| User {
            id: None,
            first_name: Some(first),
            last_name: Some(last),
            gender: Some(gender),
            email,
        })
}
