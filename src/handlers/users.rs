//! User management handlers.
//!
//! - `POST /users` - Creates a user (admin only)

use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::error::AppResult;
use crate::handlers::auth::AppState;
use crate::middleware::auth::AuthenticatedUser;
use crate::models::user::{Role, UserStatus};
use crate::services::user::create_user;

/// Request body for creating a user.
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub name: Option<String>,
    pub email: String,
    pub password: String,
    /// Role for the new account; defaults to a regular user
    pub role: Option<Role>,
    /// Status for the new account; defaults to active
    pub status: Option<UserStatus>,
}

/// Creates a user. Admin only.
///
/// An already-registered email yields 409.
pub async fn create(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
    body: web::Json<CreateUserRequest>,
) -> AppResult<HttpResponse> {
    auth.require_admin()?;

    let user = create_user(
        &state.pool,
        body.name.as_deref(),
        &body.email,
        &body.password,
        body.role.unwrap_or(Role::User),
        body.status.unwrap_or(UserStatus::Active),
    )
    .await?;

    tracing::info!(user_id = %user.id, email = %user.email, "user created");

    Ok(HttpResponse::Created().json(user))
}
