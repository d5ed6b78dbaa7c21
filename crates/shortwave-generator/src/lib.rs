//! Short code generation for the Shortwave URL shortener.

pub mod random;

pub use random::RandomGenerator;
use shortwave_core::ShortCode;

/// Trait for generating short codes.
///
/// Implementations are pure generators that don't interact with
/// storage: uniqueness against existing records is the registrar's
/// job, enforced by its retry loop and the storage unique constraint.
pub trait Generator: Send + Sync + 'static {
    type Output: Into<ShortCode>;

    /// Generates a candidate short code.
    ///
    /// Always succeeds; a candidate may still collide with a stored
    /// code and be discarded by the caller.
    fn generate(&self) -> Self::Output;
}
