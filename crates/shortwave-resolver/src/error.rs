use shortwave_core::StorageError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ResolveError>;

/// Failures surfaced by the redirect path.
///
/// `Expired` is distinct from `NotFound` so a caller can tell "wrong
/// link" from "link died".
#[derive(Debug, Clone, Error)]
pub enum ResolveError {
    /// No stored short value ends with the requested code.
    #[error("short link not found")]
    NotFound,
    /// The link exists but its expiry timestamp has passed.
    #[error("short link has expired")]
    Expired,
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}
