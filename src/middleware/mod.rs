//! Middleware for the teambase application.
//!
//! This module contains:
//! - `auth` - Login-token authentication guard (AuthenticatedUser extractor)

pub mod auth;

pub use auth::{AuthError, AuthenticatedUser};
