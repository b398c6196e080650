// crates/backend-lib/src/middleware/mod.rs

//! Middleware for the weather API server.

pub mod auth;

pub use auth::{require_bearer, AuthenticatedUser};
