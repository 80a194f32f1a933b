//! Checkout draft repository.
//!
//! Finalization never deletes a draft; abandoned and aged-out drafts are
//! reclaimed out of band through [`delete_expired`].
//!
//! [`delete_expired`]: CheckoutDraftRepository::delete_expired

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use sqlx::types::Json;

use unique_items_core::{CheckoutDraftId, Rupees};

use super::RepositoryError;
use crate::models::checkout_draft::{CheckoutDraft, NewCheckoutDraft};

// =============================================================================
// Internal Row Types
// =============================================================================

/// Internal row type for `PostgreSQL` checkout draft queries.
#[derive(Debug, sqlx::FromRow)]
struct CheckoutDraftRow {
    id: CheckoutDraftId,
    form: serde_json::Value,
    items: serde_json::Value,
    subtotal: i64,
    shipping: i64,
    total: i64,
    expires_at: DateTime<Utc>,
    created_at: DateTime<Utc>,
}

impl TryFrom<CheckoutDraftRow> for CheckoutDraft {
    type Error = RepositoryError;

    fn try_from(row: CheckoutDraftRow) -> Result<Self, Self::Error> {
        let form = serde_json::from_value(row.form)
            .map_err(|e| RepositoryError::DataCorruption(format!("invalid draft form: {e}")))?;
        let items = serde_json::from_value(row.items)
            .map_err(|e| RepositoryError::DataCorruption(format!("invalid draft items: {e}")))?;

        Ok(Self {
            id: row.id,
            form,
            items,
            subtotal: Rupees::new(row.subtotal),
            shipping: Rupees::new(row.shipping),
            total: Rupees::new(row.total),
            expires_at: row.expires_at,
            created_at: row.created_at,
        })
    }
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for checkout draft database operations.
#[derive(Debug, Clone, Copy)]
pub struct CheckoutDraftRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CheckoutDraftRepository<'a> {
    /// Creates a new repository with the given database pool.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Persists a staged checkout.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub async fn create(&self, new: &NewCheckoutDraft) -> Result<CheckoutDraft, RepositoryError> {
        let row = sqlx::query_as::<_, CheckoutDraftRow>(
            r"
            INSERT INTO checkout_drafts (id, form, items, subtotal, shipping, total, expires_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, form, items, subtotal, shipping, total, expires_at, created_at
            ",
        )
        .bind(new.id)
        .bind(Json(&new.form))
        .bind(Json(&new.items))
        .bind(new.subtotal.amount())
        .bind(new.shipping.amount())
        .bind(new.total.amount())
        .bind(new.expires_at)
        .fetch_one(self.pool)
        .await?;

        row.try_into()
    }

    /// Finds a draft by ID. Expiry is not checked here; callers decide how
    /// stale a draft they accept.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails or the row is invalid.
    pub async fn get(&self, id: CheckoutDraftId) -> Result<Option<CheckoutDraft>, RepositoryError> {
        let row = sqlx::query_as::<_, CheckoutDraftRow>(
            r"
            SELECT id, form, items, subtotal, shipping, total, expires_at, created_at
            FROM checkout_drafts
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// Deletes drafts that expired at or before `now`, returning how many
    /// rows were removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, RepositoryError> {
        let result = sqlx::query("DELETE FROM checkout_drafts WHERE expires_at <= $1")
            .bind(now)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
