use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use shortwave_core::{
    Link, LinkReadStore, LinkStore, NewLink, NewUser, StorageError, User, UserId, UserStore,
};
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

type Result<T> = std::result::Result<T, StorageError>;

#[derive(Debug, Default)]
struct Inner {
    /// Links keyed by their full stored short value.
    links: DashMap<String, Link>,
    users: DashMap<UserId, User>,
    /// Uniqueness claims for user fields; entries are taken atomically
    /// so racing registrations cannot both win the same name or
    /// address.
    usernames: DashMap<String, UserId>,
    emails: DashMap<String, UserId>,
    next_link_id: AtomicI64,
    next_user_id: AtomicI64,
}

/// In-memory implementation of the storage traits using DashMap.
///
/// The maps live behind an `Arc`, so clones observe the same store.
/// DashMap's sharded locks let concurrent requests touch different
/// buckets without blocking each other.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    inner: Arc<Inner>,
}

impl InMemoryStore {
    /// Creates a new empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LinkReadStore for InMemoryStore {
    async fn find_by_code_suffix(&self, code: &str) -> Result<Option<Link>> {
        let found = self
            .inner
            .links
            .iter()
            .find(|entry| entry.key().ends_with(code))
            .map(|entry| entry.value().clone());
        Ok(found)
    }

    async fn find_by_owner(&self, owner: UserId) -> Result<Vec<Link>> {
        let links = self
            .inner
            .links
            .iter()
            .filter(|entry| entry.value().user_id == owner)
            .map(|entry| entry.value().clone())
            .collect();
        Ok(links)
    }
}

#[async_trait]
impl LinkStore for InMemoryStore {
    async fn insert(&self, link: NewLink) -> Result<Link> {
        if link.expires_at <= link.created_at {
            return Err(StorageError::InvalidData(format!(
                "expires_at must be later than created_at for '{}'",
                link.short_value
            )));
        }

        let id = self.inner.next_link_id.fetch_add(1, Ordering::SeqCst) + 1;
        let record = Link {
            id,
            long_url: link.long_url,
            short_value: link.short_value,
            created_at: link.created_at,
            expires_at: link.expires_at,
            user_id: link.user_id,
        };

        // Short values are never reused, expired entries included, so
        // an occupied slot is always a conflict.
        match self.inner.links.entry(record.short_value.clone()) {
            Entry::Occupied(_) => Err(StorageError::Conflict(record.short_value)),
            Entry::Vacant(slot) => {
                slot.insert(record.clone());
                Ok(record)
            }
        }
    }

    async fn find_by_short_value(&self, value: &str) -> Result<Option<Link>> {
        Ok(self
            .inner
            .links
            .get(value)
            .map(|entry| entry.value().clone()))
    }
}

#[async_trait]
impl UserStore for InMemoryStore {
    async fn insert(&self, user: NewUser) -> Result<User> {
        let id = self.inner.next_user_id.fetch_add(1, Ordering::SeqCst) + 1;

        // Claim the username and email through the entry API so two
        // racing registrations cannot both succeed; the loser of the
        // email claim releases its username again.
        match self.inner.usernames.entry(user.username.clone()) {
            Entry::Occupied(_) => return Err(StorageError::Conflict(user.username)),
            Entry::Vacant(slot) => {
                slot.insert(id);
            }
        }
        match self.inner.emails.entry(user.email.clone()) {
            Entry::Occupied(_) => {
                self.inner.usernames.remove(&user.username);
                return Err(StorageError::Conflict(user.email));
            }
            Entry::Vacant(slot) => {
                slot.insert(id);
            }
        }

        let record = User {
            id,
            username: user.username,
            email: user.email,
            password_digest: user.password_digest,
            created_at: user.created_at,
            updated_at: user.updated_at,
        };
        self.inner.users.insert(id, record.clone());
        Ok(record)
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>> {
        Ok(self
            .inner
            .users
            .get(&id)
            .map(|entry| entry.value().clone()))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        let Some(id) = self.inner.usernames.get(username).map(|entry| *entry.value()) else {
            return Ok(None);
        };
        self.find_by_id(id).await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let Some(id) = self.inner.emails.get(email).map(|entry| *entry.value()) else {
            return Ok(None);
        };
        self.find_by_id(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::{SignedDuration, Timestamp};

    fn new_link(short_value: &str, user_id: UserId) -> NewLink {
        let now = Timestamp::now();
        NewLink {
            long_url: "https://example.com".to_string(),
            short_value: short_value.to_string(),
            created_at: now,
            expires_at: now + SignedDuration::from_hours(24),
            user_id,
        }
    }

    fn new_user(username: &str, email: &str) -> NewUser {
        NewUser::at(username, email, "digest", Timestamp::now())
    }

    // `InMemoryStore` carries both `insert` methods, so the calls are
    // trait-qualified throughout.
    async fn put_link(store: &InMemoryStore, link: NewLink) -> Result<Link> {
        LinkStore::insert(store, link).await
    }

    async fn put_user(store: &InMemoryStore, user: NewUser) -> Result<User> {
        UserStore::insert(store, user).await
    }

    #[tokio::test]
    async fn insert_and_find_by_short_value() {
        let store = InMemoryStore::new();

        let link = put_link(&store, new_link("localhost:8000/ab12XY9", 1))
            .await
            .unwrap();
        assert_eq!(link.id, 1);

        let found = store
            .find_by_short_value("localhost:8000/ab12XY9")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found, link);
    }

    #[tokio::test]
    async fn find_by_short_value_is_exact() {
        let store = InMemoryStore::new();
        put_link(&store, new_link("localhost:8000/ab12XY9", 1))
            .await
            .unwrap();

        let found = store.find_by_short_value("ab12XY9").await.unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn suffix_lookup_matches_trailing_code() {
        let store = InMemoryStore::new();
        put_link(&store, new_link("localhost:8000/ab12XY9", 1))
            .await
            .unwrap();

        let found = store.find_by_code_suffix("ab12XY9").await.unwrap().unwrap();
        assert_eq!(found.short_value, "localhost:8000/ab12XY9");

        let missing = store.find_by_code_suffix("zzzzzzz").await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn suffix_lookup_is_case_sensitive() {
        let store = InMemoryStore::new();
        put_link(&store, new_link("localhost:8000/ab12XY9", 1))
            .await
            .unwrap();

        let found = store.find_by_code_suffix("AB12xy9").await.unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn duplicate_short_value_conflicts() {
        let store = InMemoryStore::new();
        put_link(&store, new_link("localhost:8000/ab12XY9", 1))
            .await
            .unwrap();

        let err = put_link(&store, new_link("localhost:8000/ab12XY9", 2))
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::Conflict(_)));
    }

    #[tokio::test]
    async fn expired_short_value_is_still_taken() {
        let store = InMemoryStore::new();
        let past = Timestamp::now() - SignedDuration::from_hours(48);
        put_link(
            &store,
            NewLink {
                long_url: "https://old.example.com".to_string(),
                short_value: "localhost:8000/oldcode".to_string(),
                created_at: past,
                expires_at: past + SignedDuration::from_hours(24),
                user_id: 1,
            },
        )
        .await
        .unwrap();

        let err = put_link(&store, new_link("localhost:8000/oldcode", 2))
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::Conflict(_)));
    }

    #[tokio::test]
    async fn rejects_expiry_not_after_creation() {
        let store = InMemoryStore::new();
        let now = Timestamp::now();

        let err = put_link(
            &store,
            NewLink {
                long_url: "https://example.com".to_string(),
                short_value: "localhost:8000/badlink".to_string(),
                created_at: now,
                expires_at: now,
                user_id: 1,
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, StorageError::InvalidData(_)));
    }

    #[tokio::test]
    async fn find_by_owner_filters_links() {
        let store = InMemoryStore::new();
        put_link(&store, new_link("localhost:8000/aaaaaaa", 1))
            .await
            .unwrap();
        put_link(&store, new_link("localhost:8000/bbbbbbb", 1))
            .await
            .unwrap();
        put_link(&store, new_link("localhost:8000/ccccccc", 2))
            .await
            .unwrap();

        let owned = store.find_by_owner(1).await.unwrap();
        assert_eq!(owned.len(), 2);
        assert!(owned.iter().all(|l| l.user_id == 1));

        let other = store.find_by_owner(2).await.unwrap();
        assert_eq!(other.len(), 1);

        let none = store.find_by_owner(3).await.unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn clones_share_state() {
        let store = InMemoryStore::new();
        let view = store.clone();

        put_link(&store, new_link("localhost:8000/shared1", 1))
            .await
            .unwrap();

        let found = view.find_by_code_suffix("shared1").await.unwrap();
        assert!(found.is_some());
    }

    #[tokio::test]
    async fn user_insert_and_lookups() {
        let store = InMemoryStore::new();

        let user = put_user(&store, new_user("alice", "alice@example.com"))
            .await
            .unwrap();
        assert_eq!(user.id, 1);

        let by_name = store.find_by_username("alice").await.unwrap().unwrap();
        assert_eq!(by_name, user);

        let by_email = store
            .find_by_email("alice@example.com")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(by_email, user);

        let by_id = store.find_by_id(user.id).await.unwrap().unwrap();
        assert_eq!(by_id, user);

        assert!(store.find_by_username("bob").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn duplicate_username_conflicts() {
        let store = InMemoryStore::new();
        put_user(&store, new_user("alice", "alice@example.com"))
            .await
            .unwrap();

        let err = put_user(&store, new_user("alice", "other@example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::Conflict(_)));
    }

    #[tokio::test]
    async fn duplicate_email_conflicts() {
        let store = InMemoryStore::new();
        put_user(&store, new_user("alice", "alice@example.com"))
            .await
            .unwrap();

        let err = put_user(&store, new_user("bob", "alice@example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::Conflict(_)));
    }

    #[tokio::test]
    async fn rejected_email_releases_the_username() {
        let store = InMemoryStore::new();
        put_user(&store, new_user("alice", "alice@example.com"))
            .await
            .unwrap();

        // Loses the email claim, so its username must stay free.
        put_user(&store, new_user("bob", "alice@example.com"))
            .await
            .unwrap_err();

        let user = put_user(&store, new_user("bob", "bob@example.com"))
            .await
            .unwrap();
        assert_eq!(user.username, "bob");
    }

    #[tokio::test]
    async fn concurrent_inserts() {
        let store = InMemoryStore::new();
        let mut handles = vec![];

        for i in 0..10u64 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                put_link(&store, new_link(&format!("localhost:8000/code{:03}", i), 1))
                    .await
                    .unwrap();
            }));
        }

        for handle in handles {
            handle.await.unwrap();
        }

        let owned = store.find_by_owner(1).await.unwrap();
        assert_eq!(owned.len(), 10);
    }

    #[tokio::test]
    async fn concurrent_registrations_of_same_username_admit_one() {
        let store = InMemoryStore::new();
        let mut handles = vec![];

        for i in 0..10u64 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                put_user(&store, new_user("alice", &format!("alice{i}@example.com"))).await
            }));
        }

        let mut successes = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => successes += 1,
                Err(err) => assert!(matches!(err, StorageError::Conflict(_))),
            }
        }
        assert_eq!(successes, 1);

        let user = store.find_by_username("alice").await.unwrap().unwrap();
        assert_eq!(user.username, "alice");
    }
}
