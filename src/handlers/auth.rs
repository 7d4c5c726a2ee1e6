//! Authentication handlers for the session-token login flow.
//!
//! This module provides the following endpoints:
//! - `POST /auth/login` - Verifies credentials and issues a login token
//! - `POST /auth/logout` - Revokes the caller's login token
//! - `GET /auth/me` - Returns the authenticated user

use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthenticatedUser;
use crate::models::user::User;
use crate::services::token::verify_password;
use crate::services::user::{find_by_email, issue_login_token, revoke_login_token};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub pool: SqlitePool,
    /// Application configuration
    pub config: Config,
}

/// Request body for the login endpoint.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Response from the login endpoint.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    /// Opaque bearer token for subsequent requests
    pub token: String,
    /// The authenticated user
    pub user: User,
}

/// Response from the logout endpoint.
#[derive(Debug, Serialize)]
pub struct LogoutResponse {
    pub status: String,
}

/// Verifies email and password and issues a login token.
///
/// Unknown emails and wrong passwords are indistinguishable in the
/// response. Blocked accounts are rejected even with correct credentials.
pub async fn login(
    state: web::Data<AppState>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let user = find_by_email(&state.pool, &body.email)
        .await?
        .ok_or_else(|| AppError::Unauthorized("invalid email or password".to_string()))?;

    if !verify_password(&body.password, &user.password_hash) {
        return Err(AppError::Unauthorized(
            "invalid email or password".to_string(),
        ));
    }

    if !user.is_active() {
        return Err(AppError::Unauthorized("account is blocked".to_string()));
    }

    let token = issue_login_token(&state.pool, user.id).await?;

    tracing::info!(user_id = %user.id, "user logged in");

    Ok(HttpResponse::Ok().json(LoginResponse { token, user }))
}

/// Revokes the caller's login token.
///
/// A no-op when the guard is disabled and no identity exists.
pub async fn logout(state: web::Data<AppState>, auth: AuthenticatedUser) -> AppResult<HttpResponse> {
    if let Some(user) = &auth.user {
        revoke_login_token(&state.pool, user.id).await?;
        tracing::info!(user_id = %user.id, "user logged out");
    }

    Ok(HttpResponse::Ok().json(LogoutResponse {
        status: "logged_out".to_string(),
    }))
}

/// Returns the authenticated user.
pub async fn me(auth: AuthenticatedUser) -> AppResult<HttpResponse> {
    let user = auth.require_user()?;
    Ok(HttpResponse::Ok().json(user))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_request_deserialization() {
        let body = r#"{"email": "a@b.com", "password": "pw"}"#;
        let req: LoginRequest = serde_json::from_str(body).expect("Failed to deserialize");
        assert_eq!(req.email, "a@b.com");
        assert_eq!(req.password, "pw");
    }
}
