//! Storage backends for the Shortwave URL shortener.
//!
//! Two implementations of the core storage traits: an in-memory store
//! for tests and smoke runs, and a SQLite store for the single-node
//! deployment shape. Both enforce short value uniqueness at the write
//! layer so the registrar's read-check stays an optimization.

pub mod memory;
pub mod sqlite;

pub use memory::InMemoryStore;
pub use sqlite::SqliteStore;
