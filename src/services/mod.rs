//! Services module - business logic over the database pool.
//!
//! This module contains:
//! - `token`: Login-token generation and password hashing
//! - `user`: User lookups, creation, and session-token management
//! - `team`: Team creation and membership management

pub mod team;
pub mod token;
pub mod user;

pub use token::{generate_login_token, hash_password, verify_password};
