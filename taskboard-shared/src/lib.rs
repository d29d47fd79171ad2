//! # Taskboard Shared Library
//!
//! Types and persistence used by the Taskboard API server.
//!
//! ## Module Organization
//!
//! - `models`: User and task row types
//! - `store`: Storage trait with PostgreSQL, MySQL and in-memory backends
//! - `db`: Connection pools and embedded migrations
//! - `auth`: Password hashing, access tokens, and auth middleware

pub mod auth;
pub mod db;
pub mod models;
pub mod store;

/// Current version of the Taskboard shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
