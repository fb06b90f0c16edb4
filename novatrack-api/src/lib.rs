//! # Novatrack API Server Library
//!
//! This library provides the core functionality for the Novatrack API
//! server: the public ticket submission surface and the authenticated
//! admin surface.
//!
//! ## Modules
//!
//! - `app`: Application state and router builder
//! - `config`: Configuration management
//! - `error`: Error handling and HTTP response mapping
//! - `extract`: Request extractors with product error mapping
//! - `routes`: API route handlers

pub mod app;
pub mod config;
pub mod error;
pub mod extract;
pub mod routes;
