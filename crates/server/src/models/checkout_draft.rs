//! Checkout draft domain types.
//!
//! A draft stages a validated checkout server-side between checkout-start and
//! payment-proof submission, so a partial failure is recoverable and the
//! totals the order is created with are the server's, not the client's.

use chrono::{DateTime, Utc};
use serde::Serialize;

use unique_items_core::checkout::CheckoutForm;
use unique_items_core::{CheckoutDraftId, Rupees};

use super::order::OrderItem;

/// How long a staged checkout stays finalizable.
pub const DRAFT_TTL_HOURS: i64 = 24;

/// A staged checkout awaiting payment proof (domain type).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutDraft {
    /// Draft ID; carried by the client and used to deduplicate finalization.
    #[serde(rename = "draftId")]
    pub id: CheckoutDraftId,
    /// Validated checkout form.
    pub form: CheckoutForm,
    /// Cart lines frozen at draft creation.
    pub items: Vec<OrderItem>,
    /// Server-computed sum of line totals.
    pub subtotal: Rupees,
    /// Server-computed shipping fee.
    pub shipping: Rupees,
    /// Server-computed grand total.
    pub total: Rupees,
    /// When the draft stops being finalizable.
    pub expires_at: DateTime<Utc>,
    /// When the draft was staged.
    pub created_at: DateTime<Utc>,
}

impl CheckoutDraft {
    /// Whether the draft has passed its expiry.
    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

/// Input for persisting a new checkout draft.
#[derive(Debug, Clone)]
pub struct NewCheckoutDraft {
    pub id: CheckoutDraftId,
    pub form: CheckoutForm,
    pub items: Vec<OrderItem>,
    pub subtotal: Rupees,
    pub shipping: Rupees,
    pub total: Rupees,
    pub expires_at: DateTime<Utc>,
}
