//! Public pages.
//!
//! - `GET /` - Homepage with application name, version, and environment

use actix_web::{web, HttpResponse, Responder};
use serde::Serialize;

use crate::handlers::auth::AppState;

/// Homepage response structure.
#[derive(Debug, Serialize)]
pub struct HomepageResponse {
    pub name: String,
    pub version: String,
    pub environment: String,
}

/// Homepage: identifies the application.
pub async fn homepage(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(HomepageResponse {
        name: state.config.app_name.clone(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        environment: state.config.env.to_string(),
    })
}

/// JSON 404 for unmatched routes.
pub async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({
        "error": "not found"
    }))
}
