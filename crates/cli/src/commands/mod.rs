//! CLI command implementations.

pub mod admin;
pub mod drafts;
pub mod migrate;
pub mod seed;

use secrecy::SecretString;

/// Read the database URL from the environment.
///
/// `UNIQUE_ITEMS_DATABASE_URL` wins; `DATABASE_URL` is the fallback so the
/// CLI works unchanged against managed Postgres providers.
pub(crate) fn database_url() -> Option<SecretString> {
    std::env::var("UNIQUE_ITEMS_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map(SecretString::from)
        .ok()
}
