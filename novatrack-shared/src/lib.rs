//! # Novatrack Shared Library
//!
//! This crate contains the domain types, validation rules, persistence layer,
//! and authentication primitives shared by the Novatrack API server (and any
//! future operator tooling).
//!
//! ## Module Organization
//!
//! - `models`: Database models (tickets, operator accounts)
//! - `validation`: Typed input objects and field-level validation rules
//! - `auth`: Password hashing, session tokens, credential verification
//! - `db`: Connection pool and migrations
//! - `dashboard`: Pure derived-state helpers for the admin dashboard

pub mod auth;
pub mod dashboard;
pub mod db;
pub mod models;
pub mod validation;

/// Current version of the Novatrack shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
