/// Database utilities
///
/// This module provides the PostgreSQL connection pool and migration runner.
///
/// The pool is created explicitly at process startup and owned by the
/// application state; there is no lazily-initialized global connection.

pub mod migrations;
pub mod pool;
