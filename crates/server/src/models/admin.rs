//! Admin account domain types.

use chrono::{DateTime, Utc};

use unique_items_core::{AdminId, Email};

/// An admin account (domain type).
///
/// Deliberately not serializable; the password hash must never reach a
/// response body. Routes answer with [`super::session::CurrentAdmin`].
#[derive(Debug, Clone)]
pub struct Admin {
    /// Unique admin ID.
    pub id: AdminId,
    /// Admin's email address.
    pub email: Email,
    /// Argon2 password hash.
    pub password_hash: String,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
}
