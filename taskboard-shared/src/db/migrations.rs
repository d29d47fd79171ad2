/// Database migration runner
///
/// Schema files are embedded at compile time with `sqlx::migrate!`, one
/// directory per backend:
///
/// - `migrations/postgres/`
/// - `migrations/mysql/`
///
/// Both create the same two tables (`users`, `tasks`) with dialect-specific
/// column types.

use sqlx::{mysql::MySqlPool, postgres::PgPool};
use tracing::{info, warn};

/// Runs all pending PostgreSQL migrations
///
/// # Errors
///
/// Returns an error if a migration fails to apply or the history table
/// disagrees with the embedded files.
pub async fn run_pg_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    info!("Starting database migrations (postgres)");

    match sqlx::migrate!("./migrations/postgres").run(pool).await {
        Ok(()) => {
            info!("All database migrations completed successfully");
            Ok(())
        }
        Err(e) => {
            warn!("Migration failed: {}", e);
            Err(e)
        }
    }
}

/// Runs all pending MySQL migrations
///
/// # Errors
///
/// Same conditions as [`run_pg_migrations`].
pub async fn run_mysql_migrations(pool: &MySqlPool) -> Result<(), sqlx::migrate::MigrateError> {
    info!("Starting database migrations (mysql)");

    match sqlx::migrate!("./migrations/mysql").run(pool).await {
        Ok(()) => {
            info!("All database migrations completed successfully");
            Ok(())
        }
        Err(e) => {
            warn!("Migration failed: {}", e);
            Err(e)
        }
    }
}
