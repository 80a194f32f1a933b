//! Database operations for the Unique Items `PostgreSQL` database.
//!
//! ## Tables
//!
//! - `products` - Catalog products
//! - `orders` - Placed orders (form and line items embedded as JSONB)
//! - `checkout_drafts` - Staged checkouts awaiting payment proof
//! - `contact_messages` - Public contact form submissions
//! - `admins` - Admin accounts
//! - `tower_sessions.session` - Session store (cart + admin login)
//!
//! # Migrations
//!
//! Migrations are stored in `crates/server/migrations/` and run via:
//! ```bash
//! cargo run -p unique-items-cli -- migrate run
//! ```
//!
//! Queries use the runtime-checked sqlx API; each repository decodes into an
//! internal row type and converts to a domain type, mapping invalid stored
//! data to [`RepositoryError::DataCorruption`].

pub mod admins;
pub mod checkout_drafts;
pub mod contact_messages;
pub mod orders;
pub mod products;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use admins::AdminRepository;
pub use checkout_drafts::CheckoutDraftRepository;
pub use contact_messages::ContactMessageRepository;
pub use orders::OrderRepository;
pub use products::ProductRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., unique slug).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
