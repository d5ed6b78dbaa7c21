use crate::credentials::TokenError;
use shortwave_core::StorageError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AccountError>;

/// Failures surfaced by registration, login, and authentication.
#[derive(Debug, Clone, Error)]
pub enum AccountError {
    #[error("email already registered: {0}")]
    EmailTaken(String),
    #[error("username already registered: {0}")]
    UsernameTaken(String),
    /// Unknown username or failed password verification; the two are
    /// deliberately indistinguishable.
    #[error("incorrect username or password")]
    InvalidCredentials,
    #[error("invalid or expired token")]
    InvalidToken,
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

impl From<TokenError> for AccountError {
    fn from(_: TokenError) -> Self {
        AccountError::InvalidToken
    }
}
