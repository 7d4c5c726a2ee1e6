//! User model and the status/role vocabularies shared across models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Account status. Stored as an integer; blocked accounts cannot
/// authenticate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[repr(i32)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    Blocked = 0,
    Active = 1,
}

impl UserStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserStatus::Blocked => "blocked",
            UserStatus::Active => "active",
        }
    }
}

/// Role carried by users and team memberships.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Full administrative access
    Admin,
    /// A regular account
    User,
    /// A team membership role
    Member,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::User => "user",
            Role::Member => "member",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A registered account.
///
/// Users authenticate with an email and password and carry an opaque login
/// token while a session is active. Deleting a user is a soft delete by
/// default; the row is retained with `deleted` set.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique identifier for the user (UUID v4)
    pub id: Uuid,

    /// Display name, optional
    pub name: Option<String>,

    /// Email address, unique across all users
    pub email: String,

    /// Argon2id password hash; never serialized into responses
    #[serde(skip_serializing, default)]
    pub password_hash: String,

    /// Account status; blocked accounts cannot authenticate
    pub status: UserStatus,

    /// Role of the account
    pub role: Role,

    /// Opaque session token, present while the user is logged in
    #[serde(skip_serializing, default)]
    pub login_token: Option<String>,

    /// Timestamp when the user record was created
    pub created_at: DateTime<Utc>,

    /// Soft-delete flag
    pub deleted: bool,
}

impl User {
    /// Whether the account is allowed to authenticate.
    pub fn is_active(&self) -> bool {
        self.status == UserStatus::Active && !self.deleted
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        User {
            id: Uuid::new_v4(),
            name: Some("Test User".to_string()),
            email: "test@example.com".to_string(),
            password_hash: "$argon2id$fake".to_string(),
            status: UserStatus::Active,
            role: Role::User,
            login_token: Some("tb_secret".to_string()),
            created_at: Utc::now(),
            deleted: false,
        }
    }

    #[test]
    fn test_serialization_hides_credentials() {
        let user = sample_user();
        let json = serde_json::to_string(&user).expect("Failed to serialize user");
        assert!(json.contains("\"email\":\"test@example.com\""));
        assert!(!json.contains("password_hash"));
        assert!(!json.contains("login_token"));
    }

    #[test]
    fn test_is_active() {
        let mut user = sample_user();
        assert!(user.is_active());

        user.status = UserStatus::Blocked;
        assert!(!user.is_active());

        user.status = UserStatus::Active;
        user.deleted = true;
        assert!(!user.is_active());
    }

    #[test]
    fn test_role_strings() {
        assert_eq!(Role::Admin.as_str(), "admin");
        assert_eq!(Role::User.as_str(), "user");
        assert_eq!(Role::Member.to_string(), "member");
    }
}
