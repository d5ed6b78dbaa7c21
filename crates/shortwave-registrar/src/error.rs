use shortwave_core::StorageError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RegistrarError>;

/// Failures surfaced by the creation path.
///
/// A duplicate candidate code is not represented here: the registrar
/// recovers from it internally by drawing a fresh candidate.
#[derive(Debug, Clone, Error)]
pub enum RegistrarError {
    /// The long URL was absent or blank. Rejected before any storage
    /// interaction.
    #[error("long url must not be empty")]
    MissingLongUrl,
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}
