//! Team membership model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::user::{Role, UserStatus};

/// Links a user to a team with a membership role and status.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TeamMember {
    /// Unique identifier for the membership (UUID v4)
    pub id: Uuid,

    /// Team this membership belongs to
    pub team_id: Uuid,

    /// Member user; nullable for pending invitations
    pub user_id: Option<Uuid>,

    /// Membership status; only active members count toward a team
    pub status: UserStatus,

    /// Role within the team
    pub role: Role,

    /// Timestamp when the membership record was created
    pub created_at: DateTime<Utc>,

    /// Soft-delete flag
    pub deleted: bool,
}
