//! Session middleware configuration.
//!
//! Sets up `PostgreSQL`-backed sessions using tower-sessions. One session
//! layer serves both halves of the API: the shopper's cart lives under the
//! session's cart key, and a successful admin login stores the admin
//! identity in the same session.

use sqlx::PgPool;
use tower_sessions::cookie::SameSite;
use tower_sessions::cookie::time::Duration;
use tower_sessions::{Expiry, SessionManagerLayer};
use tower_sessions_sqlx_store::PostgresStore;

use crate::config::ServerConfig;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "unique_items_session";

/// Days of inactivity before a session (and the cart in it) expires.
const SESSION_LIFETIME_DAYS: i64 = 7;

/// Create the session layer backed by the `sessions` table.
///
/// The cookie is http-only and scoped to the whole site so the storefront
/// and admin routes share one session. `Secure` is set whenever the
/// configured public base URL is https.
#[must_use]
pub fn create_session_layer(
    pool: &PgPool,
    config: &ServerConfig,
) -> SessionManagerLayer<PostgresStore> {
    // The sessions table is created by the migrations, not by the store
    let store = PostgresStore::new(pool.clone());

    let is_secure = config.base_url.starts_with("https://");

    SessionManagerLayer::new(store)
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(Duration::days(SESSION_LIFETIME_DAYS)))
        .with_secure(is_secure)
        .with_same_site(SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
}
