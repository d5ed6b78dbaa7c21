use crate::credentials::{Claims, PasswordHasher, TokenIssuer};
use crate::error::{AccountError, Result};
use jiff::Timestamp;
use shortwave_core::{NewUser, ServiceConfig, User, UserStore};
use std::sync::Arc;
use tracing::debug;

/// Service for user registration, login, and token authentication.
///
/// Generic over the storage, hashing, and token capabilities; this
/// service only sequences them and owns the conflict and credential
/// checks.
#[derive(Debug, Clone)]
pub struct AccountService<S, H, T> {
    store: Arc<S>,
    hasher: Arc<H>,
    tokens: Arc<T>,
    config: ServiceConfig,
}

impl<S, H, T> AccountService<S, H, T>
where
    S: UserStore,
    H: PasswordHasher,
    T: TokenIssuer,
{
    /// Creates a new `AccountService`.
    pub fn new(store: S, hasher: H, tokens: T, config: ServiceConfig) -> Self {
        Self {
            store: Arc::new(store),
            hasher: Arc::new(hasher),
            tokens: Arc::new(tokens),
            config,
        }
    }

    /// Registers a new user with a hashed password.
    pub async fn register(&self, username: &str, email: &str, password: &str) -> Result<User> {
        if self.store.find_by_email(email).await?.is_some() {
            return Err(AccountError::EmailTaken(email.to_string()));
        }
        if self.store.find_by_username(username).await?.is_some() {
            return Err(AccountError::UsernameTaken(username.to_string()));
        }

        let digest = self.hasher.hash(password);
        let user = self
            .store
            .insert(NewUser::at(username, email, digest, Timestamp::now()))
            .await?;

        debug!(username, "registered user");
        Ok(user)
    }

    /// Verifies the credentials and issues an access token.
    ///
    /// The token's subject is the username; it expires `token_ttl`
    /// from now.
    pub async fn login(&self, username: &str, password: &str) -> Result<String> {
        let Some(user) = self.store.find_by_username(username).await? else {
            return Err(AccountError::InvalidCredentials);
        };

        if !self.hasher.verify(password, &user.password_digest) {
            return Err(AccountError::InvalidCredentials);
        }

        let claims = Claims {
            subject: user.username,
            expires_at: Timestamp::now() + self.config.token_ttl,
        };
        let token = self.tokens.issue(&claims)?;

        debug!(username, "issued access token");
        Ok(token)
    }

    /// Resolves a token back to its user.
    ///
    /// Any failure along the way (unverifiable token, expired claims,
    /// vanished subject) collapses to [`AccountError::InvalidToken`].
    pub async fn authenticate(&self, token: &str) -> Result<User> {
        let claims = self.tokens.validate(token)?;

        if Timestamp::now() > claims.expires_at {
            return Err(AccountError::InvalidToken);
        }

        self.store
            .find_by_username(&claims.subject)
            .await?
            .ok_or(AccountError::InvalidToken)
    }
}
