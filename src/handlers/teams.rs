//! Team management handlers.
//!
//! - `POST /teams` - Creates a team owned by the caller
//! - `POST /teams/{team_id}/members` - Adds a member (owner or admin)
//! - `GET /teams/{team_id}/members` - Lists active members

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::handlers::auth::AppState;
use crate::middleware::auth::AuthenticatedUser;
use crate::models::team::Team;
use crate::models::user::{Role, User, UserStatus};
use crate::services::{team as team_service, user as user_service};

/// Request body for creating a team.
#[derive(Debug, Deserialize)]
pub struct CreateTeamRequest {
    pub name: String,
}

/// Request body for adding a team member.
#[derive(Debug, Deserialize)]
pub struct AddMemberRequest {
    pub user_id: Uuid,
    /// Membership role; defaults to member
    pub role: Option<Role>,
}

fn can_manage_team(team: &Team, user: &User) -> bool {
    team.owner_id == user.id || user.is_admin()
}

/// Creates a team with the caller as creator and owner.
pub async fn create(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
    body: web::Json<CreateTeamRequest>,
) -> AppResult<HttpResponse> {
    let user = auth.require_user()?;

    if body.name.trim().is_empty() {
        return Err(AppError::BadRequest("team name must not be empty".to_string()));
    }

    let team = team_service::create_team(&state.pool, body.name.trim(), user.id, user.id).await?;

    tracing::info!(team_id = %team.id, owner_id = %user.id, "team created");

    Ok(HttpResponse::Created().json(team))
}

/// Adds a user to a team. Only the team owner or an admin may add members.
pub async fn add_member(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
    path: web::Path<Uuid>,
    body: web::Json<AddMemberRequest>,
) -> AppResult<HttpResponse> {
    let caller = auth.require_user()?;
    let team_id = path.into_inner();

    let team = team_service::find_by_id(&state.pool, team_id)
        .await?
        .ok_or_else(|| AppError::NotFound("team not found".to_string()))?;

    if !can_manage_team(&team, caller) {
        return Err(AppError::Forbidden(
            "only the team owner may add members".to_string(),
        ));
    }

    let member_user = user_service::find_by_id(&state.pool, body.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("user not found".to_string()))?;

    let member = team_service::add_member(
        &state.pool,
        team.id,
        member_user.id,
        body.role.unwrap_or(Role::Member),
        UserStatus::Active,
    )
    .await?;

    tracing::info!(team_id = %team.id, user_id = %member_user.id, "member added");

    Ok(HttpResponse::Created().json(member))
}

/// Lists the active members of a team. Visible to the team owner, team
/// members, and admins.
pub async fn list_members(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let caller = auth.require_user()?;
    let team_id = path.into_inner();

    let team = team_service::find_by_id(&state.pool, team_id)
        .await?
        .ok_or_else(|| AppError::NotFound("team not found".to_string()))?;

    let is_member = team_service::team_has_member(&state.pool, team.id, caller.id).await?;
    if !is_member && !can_manage_team(&team, caller) {
        return Err(AppError::Forbidden(
            "not a member of this team".to_string(),
        ));
    }

    let members = team_service::list_members(&state.pool, team.id).await?;

    Ok(HttpResponse::Ok().json(members))
}
