//! Redirect path for the Shortwave URL shortener.
//!
//! The resolver maps a requested short code to its redirect target. It
//! holds a read-only view of the link store, matches the code against
//! the suffix of stored short values, and enforces expiry at read
//! time with a failure distinct from "not found".

pub mod error;
pub mod service;

pub use error::ResolveError;
pub use service::ResolverService;
