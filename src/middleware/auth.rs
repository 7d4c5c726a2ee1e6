//! Authentication middleware for login-token validation.
//!
//! This module provides the `AuthenticatedUser` extractor that guards
//! routes: it resolves the bearer token from the `Authorization` header to
//! a user row and rejects unknown tokens and blocked accounts. When the
//! configuration sets `login_disabled` the guard admits every request
//! without resolving a user, which mirrors turning authentication off for
//! unit testing.

use actix_web::{dev::Payload, http::header, web, FromRequest, HttpRequest};
use futures_util::future::LocalBoxFuture;

use crate::error::{AppError, AppResult};
use crate::handlers::auth::AppState;
use crate::models::user::{User, UserStatus};
use crate::services::user::find_by_login_token;

/// Represents a request admitted by the authentication guard.
///
/// Used as an extractor in route handlers that require authentication. The
/// resolved user is `None` only when `login_disabled` is set; handlers that
/// need an identity call [`AuthenticatedUser::require_user`].
///
/// # Example
///
/// ```ignore
/// use teambase::middleware::auth::AuthenticatedUser;
///
/// async fn protected_route(auth: AuthenticatedUser) -> AppResult<HttpResponse> {
///     let user = auth.require_user()?;
///     Ok(HttpResponse::Ok().json(user))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    /// The resolved user; `None` only when the guard is disabled
    pub user: Option<User>,
}

impl AuthenticatedUser {
    /// The authenticated user, or 401 when the guard was disabled and no
    /// identity exists.
    pub fn require_user(&self) -> AppResult<&User> {
        self.user
            .as_ref()
            .ok_or_else(|| AppError::Unauthorized("authentication required".to_string()))
    }

    /// Admits admins. When the guard is disabled there is no identity to
    /// check and the request is admitted, matching the disabled-guard
    /// semantics everywhere else.
    pub fn require_admin(&self) -> AppResult<()> {
        match &self.user {
            None => Ok(()),
            Some(user) if user.is_admin() => Ok(()),
            Some(_) => Err(AppError::Forbidden("admin access required".to_string())),
        }
    }
}

/// Error type for authentication failures.
#[derive(Debug)]
pub enum AuthError {
    /// No Authorization header present
    MissingToken,
    /// Invalid Authorization header format
    InvalidHeader,
    /// Token does not resolve to a user
    InvalidToken,
    /// Token resolves to a blocked account
    AccountBlocked,
    /// App state not found
    MissingAppState,
    /// Token lookup failed
    Database(String),
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthError::MissingToken => write!(f, "Missing authorization token"),
            AuthError::InvalidHeader => write!(f, "Invalid authorization header format"),
            AuthError::InvalidToken => write!(f, "Invalid or expired token"),
            AuthError::AccountBlocked => write!(f, "Account is blocked"),
            AuthError::MissingAppState => write!(f, "Internal server error"),
            AuthError::Database(_) => write!(f, "Internal server error"),
        }
    }
}

impl actix_web::ResponseError for AuthError {
    fn status_code(&self) -> actix_web::http::StatusCode {
        match self {
            AuthError::MissingToken
            | AuthError::InvalidHeader
            | AuthError::InvalidToken
            | AuthError::AccountBlocked => actix_web::http::StatusCode::UNAUTHORIZED,
            AuthError::MissingAppState | AuthError::Database(_) => {
                actix_web::http::StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> actix_web::HttpResponse {
        let body = serde_json::json!({
            "error": self.to_string()
        });
        actix_web::HttpResponse::build(self.status_code()).json(body)
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = AuthError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        // Everything needed after the await point is cloned out of the
        // request up front.
        let app_state = req.app_data::<web::Data<AppState>>().cloned();
        let auth_header = req
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .map(str::to_owned);

        Box::pin(async move {
            let app_state = app_state.ok_or(AuthError::MissingAppState)?;

            if app_state.config.login_disabled {
                return Ok(AuthenticatedUser { user: None });
            }

            let header_value = auth_header.ok_or(AuthError::MissingToken)?;
            let token = header_value
                .strip_prefix("Bearer ")
                .ok_or(AuthError::InvalidHeader)?;

            let user = find_by_login_token(&app_state.pool, token)
                .await
                .map_err(|e| AuthError::Database(e.to_string()))?
                .ok_or(AuthError::InvalidToken)?;

            if user.status == UserStatus::Blocked {
                return Err(AuthError::AccountBlocked);
            }

            Ok(AuthenticatedUser { user: Some(user) })
        })
    }
}
