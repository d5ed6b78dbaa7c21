//! Creation path for the Shortwave URL shortener.
//!
//! The registrar turns a long URL and an authenticated owner into a
//! persisted, collision-free link: it draws candidate codes from a
//! [`Generator`](shortwave_generator::Generator), verifies each against
//! the stored short values, and retries until a candidate sticks. It
//! also answers owner-scoped listing.

pub mod error;
pub mod service;

pub use error::RegistrarError;
pub use service::RegistrarService;
