//! HTTP handlers for the teambase application.
//!
//! This module contains all the route handlers:
//! - `auth` - Login, logout, and current-user handlers
//! - `users` - User management (admin)
//! - `teams` - Team creation and membership
//! - `health` - Health check endpoint
//! - `pages` - Public pages
//!
//! [`configure`] registers every route and is shared between the real
//! server and the test harness.

use actix_web::web;

pub mod auth;
pub mod health;
pub mod pages;
pub mod teams;
pub mod users;

pub use auth::{AppState, LoginRequest, LoginResponse, LogoutResponse};
pub use health::{health_check, HealthResponse};
pub use pages::HomepageResponse;
pub use teams::{AddMemberRequest, CreateTeamRequest};
pub use users::CreateUserRequest;

/// Registers every application route.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(pages::homepage))
        .route("/health", web::get().to(health::health_check))
        .service(
            web::scope("/auth")
                .route("/login", web::post().to(auth::login))
                .route("/logout", web::post().to(auth::logout))
                .route("/me", web::get().to(auth::me)),
        )
        .service(web::resource("/users").route(web::post().to(users::create)))
        .service(
            web::scope("/teams")
                .route("", web::post().to(teams::create))
                .route("/{team_id}/members", web::post().to(teams::add_member))
                .route("/{team_id}/members", web::get().to(teams::list_members)),
        )
        .default_service(web::route().to(pages::not_found));
}
