//! HTTP server assembly.
//!
//! Builds the database pool, runs migrations, and serves the application
//! with request logging, CORS, and a JSON 404 fallback.

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use tracing_actix_web::TracingLogger;

use crate::config::Config;
use crate::db::{create_pool, run_migrations};
use crate::error::AppResult;
use crate::handlers::{self, AppState};

/// Runs the HTTP server in the foreground until it is shut down.
pub async fn run(config: Config) -> AppResult<()> {
    config.ensure_dirs()?;

    let pool = create_pool(&config.database_url).await?;
    tracing::info!("Database connection pool created");

    run_migrations(&pool).await?;
    tracing::info!("Database migrations completed");

    let addr = config.server_addr();
    let workers = config.workers.max(1);

    let app_state = web::Data::new(AppState {
        pool,
        config: config.clone(),
    });

    tracing::info!(environment = %config.env, "Starting server at http://{}", addr);

    HttpServer::new(move || {
        let cors = build_cors(&app_state.config.cors_origins);

        App::new()
            .app_data(app_state.clone())
            // Request logging
            .wrap(Logger::default())
            // Distributed tracing
            .wrap(TracingLogger::default())
            // CORS must be outermost so it answers preflight requests
            .wrap(cors)
            .configure(handlers::configure)
    })
    .workers(workers)
    .bind(addr.as_str())?
    .run()
    .await?;

    Ok(())
}

fn build_cors(origins: &[String]) -> Cors {
    if origins.iter().any(|o| o == "*") {
        // Wildcard origins cannot be combined with credentials.
        Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header()
    } else {
        let mut cors = Cors::default()
            .allow_any_method()
            .allow_any_header()
            .supports_credentials();
        for origin in origins {
            cors = cors.allowed_origin(origin);
        }
        cors
    }
}
