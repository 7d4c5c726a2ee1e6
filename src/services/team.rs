//! Team service for database operations.
//!
//! Team creation and membership management. Membership queries only count
//! active, non-deleted memberships.

use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::team::Team;
use crate::models::team_member::TeamMember;
use crate::models::user::{Role, UserStatus};

const TEAM_COLUMNS: &str = "id, name, creator_id, owner_id, created_at, deleted";
const MEMBER_COLUMNS: &str = "id, team_id, user_id, status, role, created_at, deleted";

/// Finds a team by id. Soft-deleted teams are not returned.
pub async fn find_by_id(pool: &SqlitePool, id: Uuid) -> AppResult<Option<Team>> {
    let team = sqlx::query_as::<_, Team>(&format!(
        "SELECT {} FROM teams WHERE id = ? AND deleted = 0",
        TEAM_COLUMNS
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(team)
}

/// Creates a team. Returns the stored team.
pub async fn create_team(
    pool: &SqlitePool,
    name: &str,
    creator_id: Uuid,
    owner_id: Uuid,
) -> AppResult<Team> {
    let team = sqlx::query_as::<_, Team>(&format!(
        "INSERT INTO teams (id, name, creator_id, owner_id, created_at, deleted) \
         VALUES (?, ?, ?, ?, ?, 0) \
         RETURNING {}",
        TEAM_COLUMNS
    ))
    .bind(Uuid::new_v4())
    .bind(name)
    .bind(creator_id)
    .bind(owner_id)
    .bind(Utc::now())
    .fetch_one(pool)
    .await?;

    Ok(team)
}

/// Adds a user to a team.
///
/// A user that is already an active member of the team yields
/// `AppError::Conflict`.
pub async fn add_member(
    pool: &SqlitePool,
    team_id: Uuid,
    user_id: Uuid,
    role: Role,
    status: UserStatus,
) -> AppResult<TeamMember> {
    if team_has_member(pool, team_id, user_id).await? {
        return Err(AppError::Conflict(
            "user is already a member of this team".to_string(),
        ));
    }

    let member = sqlx::query_as::<_, TeamMember>(&format!(
        "INSERT INTO team_members (id, team_id, user_id, status, role, created_at, deleted) \
         VALUES (?, ?, ?, ?, ?, ?, 0) \
         RETURNING {}",
        MEMBER_COLUMNS
    ))
    .bind(Uuid::new_v4())
    .bind(team_id)
    .bind(user_id)
    .bind(status)
    .bind(role)
    .bind(Utc::now())
    .fetch_one(pool)
    .await?;

    Ok(member)
}

/// Whether the user is an active member of the team.
pub async fn team_has_member(pool: &SqlitePool, team_id: Uuid, user_id: Uuid) -> AppResult<bool> {
    let row: Option<(i64,)> = sqlx::query_as(
        "SELECT 1 FROM team_members \
         WHERE team_id = ? AND user_id = ? AND status = ? AND deleted = 0",
    )
    .bind(team_id)
    .bind(user_id)
    .bind(UserStatus::Active)
    .fetch_optional(pool)
    .await?;

    Ok(row.is_some())
}

/// Lists the active memberships of a team.
pub async fn list_members(pool: &SqlitePool, team_id: Uuid) -> AppResult<Vec<TeamMember>> {
    let members = sqlx::query_as::<_, TeamMember>(&format!(
        "SELECT {} FROM team_members \
         WHERE team_id = ? AND status = ? AND deleted = 0 \
         ORDER BY created_at",
        MEMBER_COLUMNS
    ))
    .bind(team_id)
    .bind(UserStatus::Active)
    .fetch_all(pool)
    .await?;

    Ok(members)
}

/// Removes a member from a team (soft delete).
pub async fn remove_member(pool: &SqlitePool, team_id: Uuid, user_id: Uuid) -> AppResult<()> {
    sqlx::query("UPDATE team_members SET deleted = 1 WHERE team_id = ? AND user_id = ?")
        .bind(team_id)
        .bind(user_id)
        .execute(pool)
        .await?;

    Ok(())
}
