//! Admin account management commands.
//!
//! # Usage
//!
//! ```bash
//! # Create an admin account with an explicit password
//! unique-items admin create -e admin@example.com -p 'a strong password'
//!
//! # Create an admin account, taking the password from the environment
//! ADMIN_PASSWORD='a strong password' unique-items admin create -e admin@example.com
//! ```
//!
//! # Environment Variables
//!
//! - `UNIQUE_ITEMS_DATABASE_URL` (or `DATABASE_URL`) - `PostgreSQL`
//!   connection string
//! - `ADMIN_PASSWORD` - Password used when `--password` is omitted

use thiserror::Error;

use unique_items_server::db::create_pool;
use unique_items_server::services::auth::{AuthError, AuthService};

/// Errors that can occur during admin operations.
#[derive(Debug, Error)]
pub enum AdminError {
    /// Required environment variable is missing.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    /// No password given on the command line or in the environment.
    #[error("Missing password: pass --password or set ADMIN_PASSWORD")]
    MissingPassword,

    /// Database connection error.
    #[error("Database connection error: {0}")]
    Database(#[from] sqlx::Error),

    /// Account creation failed (duplicate email, weak password, ...).
    #[error("{0}")]
    Auth(#[from] AuthError),
}

/// Create a new admin account.
///
/// The password comes from `--password` or, failing that, the
/// `ADMIN_PASSWORD` environment variable. Hashing and email normalization
/// are handled by the same service the login endpoint uses, so an account
/// created here is immediately usable.
///
/// # Arguments
///
/// * `email` - Admin's email address
/// * `password` - Plaintext password, if given on the command line
pub async fn create(email: &str, password: Option<&str>) -> Result<(), AdminError> {
    dotenvy::dotenv().ok();

    let password = match password {
        Some(p) => p.to_owned(),
        None => std::env::var("ADMIN_PASSWORD").map_err(|_| AdminError::MissingPassword)?,
    };

    let database_url = crate::commands::database_url()
        .ok_or(AdminError::MissingEnvVar("UNIQUE_ITEMS_DATABASE_URL"))?;

    tracing::info!("Connecting to database...");
    let pool = create_pool(&database_url).await?;

    tracing::info!("Creating admin account: {}", email);
    let admin = AuthService::new(&pool).create_admin(email, &password).await?;

    tracing::info!(
        "Admin account created successfully! ID: {}, Email: {}",
        admin.id,
        admin.email
    );

    Ok(())
}
