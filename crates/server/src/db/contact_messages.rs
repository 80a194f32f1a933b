//! Contact message repository for the triage inbox.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use unique_items_core::{ContactMessageId, ContactStatus, Email};

use super::RepositoryError;
use crate::models::contact_message::{ContactMessage, NewContactMessage};

// =============================================================================
// Internal Row Types
// =============================================================================

/// Internal row type for `PostgreSQL` contact message queries.
#[derive(Debug, sqlx::FromRow)]
struct ContactMessageRow {
    id: i32,
    first_name: String,
    last_name: String,
    email: String,
    whatsapp: String,
    subject: String,
    message: String,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ContactMessageRow> for ContactMessage {
    type Error = RepositoryError;

    fn try_from(row: ContactMessageRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ContactMessageId::new(row.id),
            first_name: row.first_name,
            last_name: row.last_name,
            email: Email::parse(&row.email).map_err(|e| {
                RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
            })?,
            whatsapp: row.whatsapp,
            subject: row.subject,
            message: row.message,
            status: row.status.parse().map_err(RepositoryError::DataCorruption)?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

// =============================================================================
// Repository
// =============================================================================

/// Filters for the contact inbox listing.
#[derive(Debug, Clone, Copy)]
pub struct ContactListFilter<'a> {
    /// Restrict to one triage status, or list every status.
    pub status: Option<ContactStatus>,
    /// Case-insensitive substring over sender name, email, WhatsApp number,
    /// and subject.
    pub q: Option<&'a str>,
}

/// Repository for contact message database operations.
#[derive(Debug, Clone, Copy)]
pub struct ContactMessageRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ContactMessageRepository<'a> {
    /// Creates a new repository with the given database pool.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Records a contact form submission. New messages start in `new`.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub async fn create(&self, new: &NewContactMessage) -> Result<ContactMessage, RepositoryError> {
        let row = sqlx::query_as::<_, ContactMessageRow>(
            r"
            INSERT INTO contact_messages (first_name, last_name, email, whatsapp, subject, message)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, first_name, last_name, email, whatsapp, subject, message,
                      status, created_at, updated_at
            ",
        )
        .bind(&new.first_name)
        .bind(&new.last_name)
        .bind(new.email.as_str())
        .bind(&new.whatsapp)
        .bind(&new.subject)
        .bind(&new.message)
        .fetch_one(self.pool)
        .await?;

        row.try_into()
    }

    /// Lists contact messages, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails or a row is invalid.
    pub async fn list(
        &self,
        filter: &ContactListFilter<'_>,
    ) -> Result<Vec<ContactMessage>, RepositoryError> {
        let rows = sqlx::query_as::<_, ContactMessageRow>(
            r"
            SELECT id, first_name, last_name, email, whatsapp, subject, message,
                   status, created_at, updated_at
            FROM contact_messages
            WHERE ($1::text IS NULL OR status = $1)
              AND ($2::text IS NULL
                   OR first_name ILIKE '%' || $2 || '%'
                   OR last_name ILIKE '%' || $2 || '%'
                   OR email ILIKE '%' || $2 || '%'
                   OR whatsapp ILIKE '%' || $2 || '%'
                   OR subject ILIKE '%' || $2 || '%')
            ORDER BY created_at DESC
            ",
        )
        .bind(filter.status.map(|s| s.as_str()))
        .bind(filter.q)
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Moves a message to a new triage status.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::NotFound`] if no message has the given ID,
    /// or another error if the update fails.
    pub async fn update_status(
        &self,
        id: ContactMessageId,
        status: ContactStatus,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            "UPDATE contact_messages SET status = $2, updated_at = NOW() WHERE id = $1",
        )
        .bind(id.as_i32())
        .bind(status.as_str())
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    /// Deletes a message.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::NotFound`] if no message has the given ID,
    /// or another error if the delete fails.
    pub async fn delete(&self, id: ContactMessageId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM contact_messages WHERE id = $1")
            .bind(id.as_i32())
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
