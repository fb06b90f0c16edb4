/// API route handlers
///
/// This module contains all route handlers organized by resource:
///
/// - `health`: Health check endpoint
/// - `tickets`: Public submission/list plus admin mutations
/// - `auth`: Registration and login

pub mod auth;
pub mod health;
pub mod tickets;
