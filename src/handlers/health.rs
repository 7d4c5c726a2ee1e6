//! Health check endpoint for the application.

use actix_web::{HttpResponse, Responder};
use serde::Serialize;

/// Health check response structure.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// The status of the service
    pub status: String,
}

/// Health check endpoint that returns a JSON response indicating the
/// service is healthy.
pub async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
    })
}
