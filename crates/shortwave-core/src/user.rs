use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// Storage-assigned user identifier.
pub type UserId = i64;

/// An identity record. Owns zero or more links.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    /// Unique login name, also used as the token subject.
    pub username: String,
    /// Unique contact address.
    pub email: String,
    /// Opaque digest produced by the password hashing capability.
    pub password_digest: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A user record awaiting insertion; storage assigns the identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_digest: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl NewUser {
    /// Builds a record with both timestamps set to `now`.
    pub fn at(
        username: impl Into<String>,
        email: impl Into<String>,
        password_digest: impl Into<String>,
        now: Timestamp,
    ) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            password_digest: password_digest.into(),
            created_at: now,
            updated_at: now,
        }
    }
}
