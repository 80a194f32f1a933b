//! Checkout draft maintenance commands.
//!
//! Finalized and abandoned drafts both sit in the table until their expiry
//! passes; this command is the reaper. Run it from a scheduler (cron or a
//! Fly machine) rather than relying on request traffic to clean up.
//!
//! # Usage
//!
//! ```bash
//! unique-items drafts prune
//! ```
//!
//! # Environment Variables
//!
//! - `UNIQUE_ITEMS_DATABASE_URL` (or `DATABASE_URL`) - `PostgreSQL`
//!   connection string

use chrono::Utc;
use thiserror::Error;

use unique_items_server::db::{CheckoutDraftRepository, RepositoryError, create_pool};

/// Errors that can occur while pruning drafts.
#[derive(Debug, Error)]
pub enum DraftsError {
    /// Required environment variable is missing.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    /// Database connection error.
    #[error("Database connection error: {0}")]
    Database(#[from] sqlx::Error),

    /// Delete failed.
    #[error("Prune failed: {0}")]
    Repository(#[from] RepositoryError),
}

/// Delete checkout drafts whose expiry has lapsed.
pub async fn prune() -> Result<(), DraftsError> {
    dotenvy::dotenv().ok();

    let database_url = crate::commands::database_url()
        .ok_or(DraftsError::MissingEnvVar("UNIQUE_ITEMS_DATABASE_URL"))?;

    tracing::info!("Connecting to database...");
    let pool = create_pool(&database_url).await?;

    let removed = CheckoutDraftRepository::new(&pool)
        .delete_expired(Utc::now())
        .await?;

    tracing::info!("Pruned {} expired drafts", removed);
    Ok(())
}
