//! Credential management glue for the Shortwave URL shortener.
//!
//! Registration, login, and token authentication over the
//! [`UserStore`](shortwave_core::UserStore). Password hashing and
//! token issuance are external capabilities expressed as traits; this
//! crate never touches cryptographic primitives itself.

pub mod credentials;
pub mod error;
pub mod service;

pub use credentials::{Claims, PasswordHasher, TokenError, TokenIssuer};
pub use error::AccountError;
pub use service::AccountService;
