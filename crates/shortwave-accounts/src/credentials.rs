use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Claims carried by an access token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// The authenticated username.
    pub subject: String,
    /// When the token stops being accepted.
    pub expires_at: Timestamp,
}

/// External password hashing capability.
///
/// The digest is opaque to this crate: it is stored verbatim on the
/// user record and only ever handed back to `verify`.
pub trait PasswordHasher: Send + Sync + 'static {
    fn hash(&self, password: &str) -> String;

    fn verify(&self, password: &str, digest: &str) -> bool;
}

/// Failures from the token capability.
#[derive(Debug, Clone, Error)]
pub enum TokenError {
    #[error("token is malformed or unverifiable: {0}")]
    Invalid(String),
    #[error("token has expired")]
    Expired,
}

/// External token issuance capability.
pub trait TokenIssuer: Send + Sync + 'static {
    /// Encodes the claims into an opaque token string.
    fn issue(&self, claims: &Claims) -> Result<String, TokenError>;

    /// Decodes and verifies a token back into its claims.
    ///
    /// Implementations may or may not enforce expiry themselves; the
    /// account service re-checks `expires_at` either way.
    fn validate(&self, token: &str) -> Result<Claims, TokenError>;
}
