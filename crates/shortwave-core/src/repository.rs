use crate::error::StorageError;
use crate::link::{Link, NewLink};
use crate::user::{NewUser, User, UserId};
use async_trait::async_trait;

type Result<T> = std::result::Result<T, StorageError>;

/// A read-only view of the link store.
///
/// This trait provides only the operations the resolver needs,
/// allowing the redirect path to hold read-only access.
#[async_trait]
pub trait LinkReadStore: Send + Sync + 'static {
    /// Finds a link whose stored short value ends with the given code.
    ///
    /// Matching is by suffix, not equality: the stored value carries
    /// the host prefix that the requesting side does not know.
    /// Returns `None` if no stored value has the code as a suffix.
    async fn find_by_code_suffix(&self, code: &str) -> Result<Option<Link>>;

    /// Returns every link owned by the given user, in storage-default
    /// order.
    async fn find_by_owner(&self, owner: UserId) -> Result<Vec<Link>>;
}

#[async_trait]
pub trait LinkStore: LinkReadStore {
    /// Inserts a new link and returns the persisted record.
    ///
    /// Fails with [`StorageError::Conflict`] when the short value is
    /// already taken, including by an expired link; short values are
    /// never reused. Implementations must back this with a storage
    /// level unique constraint so a concurrent racer cannot slip a
    /// duplicate past the registrar's read-check.
    async fn insert(&self, link: NewLink) -> Result<Link>;

    /// Finds a link by its exact stored short value.
    async fn find_by_short_value(&self, value: &str) -> Result<Option<Link>>;
}

#[async_trait]
pub trait UserStore: Send + Sync + 'static {
    /// Inserts a new user and returns the persisted record.
    ///
    /// Fails with [`StorageError::Conflict`] when the username or
    /// email is already registered.
    async fn insert(&self, user: NewUser) -> Result<User>;

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>>;

    async fn find_by_username(&self, username: &str) -> Result<Option<User>>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>>;
}
