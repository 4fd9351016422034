//! The user entity and its identity type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// User identifier assigned by the store on first successful save.
/// Starts at 1 and increases monotonically; immutable once assigned.
pub type UserId = i64;

/// Gender enumeration, serialized in the wire form the upstream
/// clients send (`MALE`, `ATTACK_HELICOPTER`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Gender {
    Male,
    Female,
    AttackHelicopter,
    Other,
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Gender::Male => "MALE",
            Gender::Female => "FEMALE",
            Gender::AttackHelicopter => "ATTACK_HELICOPTER",
            Gender::Other => "OTHER",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "MALE" => Ok(Gender::Male),
            "FEMALE" => Ok(Gender::Female),
            "ATTACK_HELICOPTER" => Ok(Gender::AttackHelicopter),
            "OTHER" => Ok(Gender::Other),
            other => Err(format!("unknown gender: {}", other)),
        }
    }
}

/// A user record as it flows between the form-binding boundary, the
/// store, and the cache.
///
/// Every field is optional because drafts arrive from upstream binding
/// with any subset of fields set; the store is the validation boundary
/// and rejects drafts missing a required field. `id` is `None` until the
/// store assigns it.
///
/// Equality deliberately excludes `email`: two records are the same user
/// when identity, names, and gender agree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Option<UserId>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub gender: Option<Gender>,
    pub email: Option<String>,
}

impl User {
    /// Create an unsaved draft with the required fields set.
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        gender: Gender,
    ) -> Self {
        Self {
            id: None,
            first_name: Some(first_name.into()),
            last_name: Some(last_name.into()),
            gender: Some(gender),
            email: None,
        }
    }

    /// Set the identity, as the store does at persist time.
    pub fn with_id(mut self, id: UserId) -> Self {
        self.id = Some(id);
        self
    }

    /// Set the optional email address.
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }
}

impl PartialEq for User {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.first_name == other.first_name
            && self.last_name == other.last_name
            && self.gender == other.gender
    }
}

impl Eq for User {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equality_ignores_email() {
        let a = User::new("Alice", "Smith", Gender::Female)
            .with_id(1)
            .with_email("alice.smith@example.com");
        let b = User::new("Alice", "Smith", Gender::Female).with_id(1);
        assert_eq!(a, b);
    }

    #[test]
    fn test_equality_respects_identity() {
        let a = User::new("Alice", "Smith", Gender::Female).with_id(1);
        let b = User::new("Alice", "Smith", Gender::Female).with_id(2);
        assert_ne!(a, b);

        let unsaved = User::new("Alice", "Smith", Gender::Female);
        assert_ne!(a, unsaved);
    }

    #[test]
    fn test_gender_display_from_str_round_trip() {
        for gender in [
            Gender::Male,
            Gender::Female,
            Gender::AttackHelicopter,
            Gender::Other,
        ] {
            let parsed: Gender = gender.to_string().parse().unwrap();
            assert_eq!(parsed, gender);
        }
    }

    #[test]
    fn test_gender_from_str_rejects_unknown() {
        assert!("HELICOPTER".parse::<Gender>().is_err());
    }

    #[test]
    fn test_gender_serializes_screaming_snake_case() {
        let json = serde_json::to_string(&Gender::AttackHelicopter).unwrap();
        assert_eq!(json, "\"ATTACK_HELICOPTER\"");
    }

    #[test]
    fn test_user_json_round_trip() {
        let user = User::new("Terry", "Jerry", Gender::AttackHelicopter).with_id(3);
        let json = serde_json::to_vec(&user).unwrap();
        let back: User = serde_json::from_slice(&json).unwrap();
        assert_eq!(back, user);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn prop_email_never_participates_in_equality(
                first in "[A-Za-z]{1,10}",
                last in "[A-Za-z]{1,10}",
                email in "[a-z]{1,8}@example\\.com",
            ) {
                let with_email = User::new(first.clone(), last.clone(), Gender::Other)
                    .with_email(email);
                let without_email = User::new(first, last, Gender::Other);
                prop_assert_eq!(with_email, without_email);
            }
        }
    }
}
