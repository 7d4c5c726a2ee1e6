//! Database connection pool and migration utilities.
//!
//! Provides functions for creating a SQLite connection pool and running
//! database migrations. The pool enables WAL journaling and foreign key
//! enforcement, and creates the database file on first use.

use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};

/// Creates a SQLite connection pool with configured settings.
///
/// # Arguments
/// * `database_url` - The SQLite connection string, e.g. `sqlite://content/app.db`
///
/// # Configuration
/// - WAL journal mode
/// - Foreign key enforcement
/// - Database file created if missing
/// - Maximum connections: 5
/// - Acquire timeout: 3 seconds
pub async fn create_pool(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .foreign_keys(true);

    SqlitePoolOptions::new()
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(3))
        .connect_with(options)
        .await
}

/// Runs all pending database migrations.
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

/// Drops every application table, including the migrations bookkeeping
/// table, so the schema can be recreated from scratch.
///
/// Destructive. Used by the `destroy-db` CLI command.
pub async fn drop_all_tables(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    // Drop order respects foreign key references.
    for table in ["team_members", "teams", "users", "_sqlx_migrations"] {
        sqlx::query(&format!("DROP TABLE IF EXISTS {}", table))
            .execute(pool)
            .await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn memory_pool() -> SqlitePool {
        // A single connection keeps every query on the same in-memory database.
        SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("Failed to create in-memory pool")
    }

    #[actix_web::test]
    async fn test_migrations_apply_cleanly() {
        let pool = memory_pool().await;
        run_migrations(&pool).await.expect("Migrations failed");

        let count: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name IN ('users', 'teams', 'team_members')",
        )
        .fetch_one(&pool)
        .await
        .expect("Failed to query sqlite_master");

        assert_eq!(count.0, 3);
    }

    #[actix_web::test]
    async fn test_drop_all_tables_removes_schema() {
        let pool = memory_pool().await;
        run_migrations(&pool).await.expect("Migrations failed");
        drop_all_tables(&pool).await.expect("Drop failed");

        let count: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name IN ('users', 'teams', 'team_members', '_sqlx_migrations')",
        )
        .fetch_one(&pool)
        .await
        .expect("Failed to query sqlite_master");

        assert_eq!(count.0, 0);

        // Migrations run again on the emptied database.
        run_migrations(&pool).await.expect("Re-migration failed");
    }
}
