//! # TaskHub Shared Library
//!
//! This crate contains the data model, database access, and domain logic
//! shared by the TaskHub API server and any future tooling.
//!
//! ## Module Organization
//!
//! - `models`: Database models and their tenant-scoped CRUD operations
//! - `db`: Connection pool and migration runner
//! - `derived`: Pure functions for read-time derived fields
//! - `error`: Domain error type for write operations

pub mod db;
pub mod derived;
pub mod error;
pub mod models;

/// Current version of the TaskHub shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
