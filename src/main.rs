//! teambase - Main application entry point
//!
//! A command-line launcher around the web application: run the server in
//! the foreground, manage it as a background process via a pid file, and
//! administer the database schema.

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use teambase::config::{Config, Environment};
use teambase::db::{create_pool, drop_all_tables, run_migrations};
use teambase::error::AppResult;
use teambase::{launcher, server};

#[derive(Parser)]
#[command(
    name = "teambase",
    version,
    about = "Boilerplate web application with a server-management CLI"
)]
struct Cli {
    #[command(subcommand)]
    command: CliCommand,
}

#[derive(Subcommand)]
enum CliCommand {
    /// Run the HTTP server in the foreground
    Serve,
    /// Start the HTTP server as a background process, recording its pid
    StartServer {
        /// Deployment profile for the spawned server
        #[arg(short, long)]
        mode: Option<Environment>,
        /// Number of HTTP workers
        #[arg(short = 't', long)]
        workers: Option<usize>,
    },
    /// Stop the background server recorded in the pid file
    StopServer,
    /// Create the database and apply the schema
    CreateDb,
    /// Drop every table in the database
    DestroyDb,
    /// Delete all `.log` files in the logs directory
    ClearLogs,
}

#[actix_web::main]
async fn main() {
    // Initialize tracing subscriber for structured logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "teambase=info,actix_web=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    if let Err(err) = run(cli.command).await {
        tracing::error!("{}", err);
        std::process::exit(1);
    }
}

async fn run(command: CliCommand) -> AppResult<()> {
    let config = Config::from_env()?;

    match command {
        CliCommand::Serve => server::run(config).await,

        CliCommand::StartServer { mode, workers } => {
            config.ensure_dirs()?;
            let mode = mode.unwrap_or(config.env);
            let pid = launcher::start_server(&config, mode, workers)?;
            tracing::info!(pid, mode = %mode, "server started");
            Ok(())
        }

        CliCommand::StopServer => {
            let pid = launcher::stop_server(&config)?;
            tracing::info!(pid, "sent SIGTERM to server");
            Ok(())
        }

        CliCommand::CreateDb => {
            config.ensure_dirs()?;
            let pool = create_pool(&config.database_url).await?;
            run_migrations(&pool).await?;
            tracing::info!("database created");
            Ok(())
        }

        CliCommand::DestroyDb => {
            let pool = create_pool(&config.database_url).await?;
            drop_all_tables(&pool).await?;
            tracing::info!("database destroyed");
            Ok(())
        }

        CliCommand::ClearLogs => {
            let removed = launcher::clear_logs(&config)?;
            tracing::info!(removed, "log files removed");
            Ok(())
        }
    }
}
