//! Data models for the teambase application.
//!
//! This module contains the database models used throughout the application:
//! - [`User`] - A registered account with credentials and a role
//! - [`Team`] - A collection of users sharing resources
//! - [`TeamMember`] - A user's membership in a team

pub mod team;
pub mod team_member;
pub mod user;

pub use team::Team;
pub use team_member::TeamMember;
pub use user::{Role, User, UserStatus};
