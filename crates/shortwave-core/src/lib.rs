//! Core types and traits for the Shortwave URL shortener.
//!
//! This crate provides the shared data model (links, users, short
//! codes), the storage capability traits implemented by
//! `shortwave-storage`, and the service configuration consumed by the
//! registrar, resolver, and accounts services.

pub mod config;
pub mod error;
pub mod link;
pub mod repository;
pub mod shortcode;
pub mod user;

pub use config::ServiceConfig;
pub use error::{CoreError, StorageError};
pub use link::{Link, NewLink};
pub use repository::{LinkReadStore, LinkStore, UserStore};
pub use shortcode::{ShortCode, CODE_LENGTH};
pub use user::{NewUser, User, UserId};
