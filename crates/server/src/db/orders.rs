//! Order repository for checkout and fulfillment database operations.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use sqlx::types::Json;

use unique_items_core::{CheckoutDraftId, OrderId, OrderStatus, Rupees};

use super::RepositoryError;
use crate::models::order::{NewOrder, Order};

/// Hard cap on the admin order listing.
const MAX_LISTED_ORDERS: i64 = 200;

// =============================================================================
// Internal Row Types
// =============================================================================

/// Internal row type for `PostgreSQL` order queries.
#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    id: i32,
    form: serde_json::Value,
    items: serde_json::Value,
    subtotal: i64,
    shipping: i64,
    total: i64,
    payment_proof_url: String,
    receiver: Option<serde_json::Value>,
    status: String,
    draft_id: Option<CheckoutDraftId>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<OrderRow> for Order {
    type Error = RepositoryError;

    fn try_from(row: OrderRow) -> Result<Self, Self::Error> {
        let form = serde_json::from_value(row.form)
            .map_err(|e| RepositoryError::DataCorruption(format!("invalid order form: {e}")))?;
        let items = serde_json::from_value(row.items)
            .map_err(|e| RepositoryError::DataCorruption(format!("invalid order items: {e}")))?;
        let receiver = row.receiver.map(serde_json::from_value).transpose().map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid order receiver: {e}"))
        })?;

        Ok(Self {
            id: OrderId::new(row.id),
            form,
            items,
            subtotal: Rupees::new(row.subtotal),
            shipping: Rupees::new(row.shipping),
            total: Rupees::new(row.total),
            payment_proof_url: row.payment_proof_url,
            receiver,
            status: row.status.parse().map_err(RepositoryError::DataCorruption)?,
            draft_id: row.draft_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

// =============================================================================
// Repository
// =============================================================================

/// Filters for the admin order listing.
#[derive(Debug, Clone, Copy)]
pub struct OrderListFilter<'a> {
    /// Restrict to one lifecycle status, or list every status.
    pub status: Option<OrderStatus>,
    /// Case-insensitive substring over the customer name, phone, and
    /// payment-proof URL.
    pub q: Option<&'a str>,
}

/// Repository for order database operations.
#[derive(Debug, Clone, Copy)]
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    /// Creates a new repository with the given database pool.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Records a captured order. New orders always start in
    /// `pending_verification`.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Conflict`] if an order already exists for
    /// the same checkout draft, or another error if the insert fails.
    pub async fn create(&self, new: &NewOrder) -> Result<Order, RepositoryError> {
        let row = sqlx::query_as::<_, OrderRow>(
            r"
            INSERT INTO orders (form, items, subtotal, shipping, total,
                                payment_proof_url, receiver, status, draft_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, 'pending_verification', $8)
            RETURNING id, form, items, subtotal, shipping, total,
                      payment_proof_url, receiver, status, draft_id, created_at, updated_at
            ",
        )
        .bind(Json(&new.form))
        .bind(Json(&new.items))
        .bind(new.subtotal.amount())
        .bind(new.shipping.amount())
        .bind(new.total.amount())
        .bind(&new.payment_proof_url)
        .bind(new.receiver.as_ref().map(Json))
        .bind(new.draft_id)
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::Conflict("order already exists for draft".to_owned());
            }
            RepositoryError::Database(e)
        })?;

        row.try_into()
    }

    /// Lists orders for the admin console, newest first, capped at 200 rows.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails or a row is invalid.
    pub async fn list(&self, filter: &OrderListFilter<'_>) -> Result<Vec<Order>, RepositoryError> {
        let rows = sqlx::query_as::<_, OrderRow>(
            r"
            SELECT id, form, items, subtotal, shipping, total,
                   payment_proof_url, receiver, status, draft_id, created_at, updated_at
            FROM orders
            WHERE ($1::text IS NULL OR status = $1)
              AND ($2::text IS NULL
                   OR form->>'firstName' ILIKE '%' || $2 || '%'
                   OR form->>'lastName' ILIKE '%' || $2 || '%'
                   OR form->>'phone' ILIKE '%' || $2 || '%'
                   OR payment_proof_url ILIKE '%' || $2 || '%')
            ORDER BY created_at DESC
            LIMIT $3
            ",
        )
        .bind(filter.status.map(|s| s.as_str()))
        .bind(filter.q)
        .bind(MAX_LISTED_ORDERS)
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Finds an order by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails or the row is invalid.
    pub async fn get(&self, id: OrderId) -> Result<Option<Order>, RepositoryError> {
        let row = sqlx::query_as::<_, OrderRow>(
            r"
            SELECT id, form, items, subtotal, shipping, total,
                   payment_proof_url, receiver, status, draft_id, created_at, updated_at
            FROM orders
            WHERE id = $1
            ",
        )
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// Finds the order finalized from a checkout draft, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails or the row is invalid.
    pub async fn get_by_draft_id(
        &self,
        draft_id: CheckoutDraftId,
    ) -> Result<Option<Order>, RepositoryError> {
        let row = sqlx::query_as::<_, OrderRow>(
            r"
            SELECT id, form, items, subtotal, shipping, total,
                   payment_proof_url, receiver, status, draft_id, created_at, updated_at
            FROM orders
            WHERE draft_id = $1
            ",
        )
        .bind(draft_id)
        .fetch_optional(self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// Moves an order to a new lifecycle status.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::NotFound`] if no order has the given ID,
    /// or another error if the update fails.
    pub async fn update_status(
        &self,
        id: OrderId,
        status: OrderStatus,
    ) -> Result<(), RepositoryError> {
        let result =
            sqlx::query("UPDATE orders SET status = $2, updated_at = NOW() WHERE id = $1")
                .bind(id.as_i32())
                .bind(status.as_str())
                .execute(self.pool)
                .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    /// Counts every order regardless of status.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn count(&self) -> Result<i64, RepositoryError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM orders")
            .fetch_one(self.pool)
            .await?;

        Ok(count)
    }

    /// Sums order totals, excluding cancelled and rejected orders.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn revenue(&self) -> Result<Rupees, RepositoryError> {
        let total = sqlx::query_scalar::<_, i64>(
            r"
            SELECT COALESCE(SUM(total), 0)::bigint
            FROM orders
            WHERE status NOT IN ('cancelled', 'rejected')
            ",
        )
        .fetch_one(self.pool)
        .await?;

        Ok(Rupees::new(total))
    }

    /// Counts orders currently in the given status.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn count_by_status(&self, status: OrderStatus) -> Result<i64, RepositoryError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM orders WHERE status = $1")
            .bind(status.as_str())
            .fetch_one(self.pool)
            .await?;

        Ok(count)
    }

    /// Counts orders in the given status placed at or after `since`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn count_by_status_since(
        &self,
        status: OrderStatus,
        since: DateTime<Utc>,
    ) -> Result<i64, RepositoryError> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM orders WHERE status = $1 AND created_at >= $2",
        )
        .bind(status.as_str())
        .bind(since)
        .fetch_one(self.pool)
        .await?;

        Ok(count)
    }

    /// Lists the most recent orders, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails or a row is invalid.
    pub async fn recent(&self, limit: i64) -> Result<Vec<Order>, RepositoryError> {
        let rows = sqlx::query_as::<_, OrderRow>(
            r"
            SELECT id, form, items, subtotal, shipping, total,
                   payment_proof_url, receiver, status, draft_id, created_at, updated_at
            FROM orders
            ORDER BY created_at DESC
            LIMIT $1
            ",
        )
        .bind(limit)
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }
}
