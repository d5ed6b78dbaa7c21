use crate::user::UserId;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// A persisted long-URL-to-short-code mapping.
///
/// Links are immutable after creation. An expired link is retired but
/// never deleted; the resolver reports it as expired rather than
/// missing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    /// Storage-assigned identifier.
    pub id: i64,
    /// The original URL that was shortened.
    pub long_url: String,
    /// The full stored short link (host prefix + code).
    pub short_value: String,
    /// When the mapping was created.
    pub created_at: Timestamp,
    /// When the mapping stops resolving. Always later than `created_at`.
    pub expires_at: Timestamp,
    /// The owning user.
    pub user_id: UserId,
}

impl Link {
    /// Whether the link is past its expiry at the given instant.
    ///
    /// Expiry is strict: a link resolved exactly at its expiry
    /// timestamp is still live.
    pub fn is_expired_at(&self, now: Timestamp) -> bool {
        now > self.expires_at
    }
}

/// A link record awaiting insertion; storage assigns the identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewLink {
    pub long_url: String,
    pub short_value: String,
    pub created_at: Timestamp,
    pub expires_at: Timestamp,
    pub user_id: UserId,
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::SignedDuration;

    fn link(created_at: Timestamp, expires_at: Timestamp) -> Link {
        Link {
            id: 1,
            long_url: "https://example.com".to_string(),
            short_value: "localhost:8000/ab12XY9".to_string(),
            created_at,
            expires_at,
            user_id: 1,
        }
    }

    #[test]
    fn not_expired_before_deadline() {
        let now = Timestamp::now();
        let l = link(now, now + SignedDuration::from_hours(24));
        assert!(!l.is_expired_at(now));
    }

    #[test]
    fn not_expired_exactly_at_deadline() {
        let now = Timestamp::now();
        let l = link(now - SignedDuration::from_hours(24), now);
        assert!(!l.is_expired_at(now));
    }

    #[test]
    fn expired_after_deadline() {
        let now = Timestamp::now();
        let l = link(
            now - SignedDuration::from_hours(25),
            now - SignedDuration::from_secs(1),
        );
        assert!(l.is_expired_at(now));
    }
}
