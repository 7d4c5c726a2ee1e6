//! Team model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A team is a collection of users sharing the same resources. All users
/// get a team; some teams have more than one member. Most resources in the
/// application should belong to a team.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Team {
    /// Unique identifier for the team (UUID v4)
    pub id: Uuid,

    /// Team display name
    pub name: String,

    /// User who created the team
    pub creator_id: Uuid,

    /// User who currently owns the team
    pub owner_id: Uuid,

    /// Timestamp when the team record was created
    pub created_at: DateTime<Utc>,

    /// Soft-delete flag
    pub deleted: bool,
}
