//! Database migration commands.
//!
//! # Usage
//!
//! ```bash
//! # Apply pending migrations
//! unique-items migrate run
//!
//! # Show applied and pending migrations
//! unique-items migrate status
//! ```
//!
//! # Environment Variables
//!
//! - `UNIQUE_ITEMS_DATABASE_URL` (or `DATABASE_URL`) - `PostgreSQL`
//!   connection string
//!
//! # Migration Files
//!
//! Migrations live in `crates/server/migrations/` and are embedded into the
//! server crate's [`MIGRATOR`] at build time, so the CLI and the server can
//! never disagree about the schema:
//! ```text
//! migrations/
//! ├── 20260215000001_create_products.sql
//! ├── 20260215000002_create_orders.sql
//! ├── 20260215000003_create_checkout_drafts.sql
//! └── ...
//! ```

use thiserror::Error;

use unique_items_server::MIGRATOR;
use unique_items_server::db::create_pool;

/// Errors that can occur while migrating.
#[derive(Debug, Error)]
pub enum MigrationError {
    /// Required environment variable is missing.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    /// Database connection error.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Migration failed to apply.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Apply pending database migrations.
pub async fn run() -> Result<(), MigrationError> {
    dotenvy::dotenv().ok();

    let database_url = crate::commands::database_url()
        .ok_or(MigrationError::MissingEnvVar("UNIQUE_ITEMS_DATABASE_URL"))?;

    tracing::info!("Connecting to database...");
    let pool = create_pool(&database_url).await?;

    tracing::info!("Running migrations...");
    MIGRATOR.run(&pool).await?;

    tracing::info!("Migrations complete!");
    Ok(())
}

/// Report each embedded migration as applied or pending.
pub async fn status() -> Result<(), MigrationError> {
    dotenvy::dotenv().ok();

    let database_url = crate::commands::database_url()
        .ok_or(MigrationError::MissingEnvVar("UNIQUE_ITEMS_DATABASE_URL"))?;

    tracing::info!("Connecting to database...");
    let pool = create_pool(&database_url).await?;

    // A missing ledger table means nothing has been applied yet.
    let ledger_exists: bool =
        sqlx::query_scalar("SELECT to_regclass('_sqlx_migrations') IS NOT NULL")
            .fetch_one(&pool)
            .await?;

    let applied: Vec<i64> = if ledger_exists {
        sqlx::query_scalar("SELECT version FROM _sqlx_migrations ORDER BY version")
            .fetch_all(&pool)
            .await?
    } else {
        Vec::new()
    };

    for migration in MIGRATOR.iter() {
        let state = if applied.contains(&migration.version) {
            "applied"
        } else {
            "pending"
        };
        tracing::info!("{} {} - {}", state, migration.version, migration.description);
    }

    Ok(())
}
