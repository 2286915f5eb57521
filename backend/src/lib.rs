//! Image upload backend service

#![deny(clippy::all, clippy::pedantic, clippy::nursery, missing_docs)]

/// Startup wiring for the storage subsystem
pub mod bootstrap;

/// HTTP routes
pub mod routes;

/// Server setup
pub mod server;

/// Configuration, errors and extractors
pub mod types;
