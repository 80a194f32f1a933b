//! Order domain types.
//!
//! An order embeds a snapshot of the checkout form and frozen copies of the
//! purchased lines; nothing in it references the live catalog.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use unique_items_core::cart::CartLine;
use unique_items_core::checkout::CheckoutForm;
use unique_items_core::{CheckoutDraftId, OrderId, OrderStatus, ProductId, Rupees};

use crate::config::PaymentReceiverConfig;

/// One frozen order line: a copy of the product data at purchase time.
///
/// Deserialization is lenient; only the product id is required, everything
/// else defaults to empty so a sparse client payload is still accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub id: ProductId,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub price: Rupees,
    #[serde(default)]
    pub image_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default = "default_qty")]
    pub qty: u32,
}

const fn default_qty() -> u32 {
    1
}

impl OrderItem {
    /// Coerce a client-supplied line into storable shape: a zero quantity
    /// becomes one.
    pub fn normalize(&mut self) {
        if self.qty == 0 {
            self.qty = 1;
        }
    }
}

impl From<CartLine> for OrderItem {
    fn from(line: CartLine) -> Self {
        Self {
            id: line.id,
            slug: line.slug,
            name: line.name,
            price: line.price,
            image_url: line.image_url,
            color: line.color,
            qty: line.qty,
        }
    }
}

/// Manual-transfer receiver details shown to the shopper for the advance
/// payment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PaymentReceiver {
    /// Account holder name.
    pub name: String,
    /// Easypaisa mobile number.
    pub easypaisa_msisdn: String,
}

impl From<&PaymentReceiverConfig> for PaymentReceiver {
    fn from(config: &PaymentReceiverConfig) -> Self {
        Self {
            name: config.name.clone(),
            easypaisa_msisdn: config.easypaisa_msisdn.clone(),
        }
    }
}

/// A placed order (domain type).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Unique order ID.
    pub id: OrderId,
    /// Snapshot of the checkout form as submitted.
    pub form: CheckoutForm,
    /// Frozen purchased lines.
    pub items: Vec<OrderItem>,
    /// Sum of line totals as submitted.
    pub subtotal: Rupees,
    /// Shipping fee as submitted.
    pub shipping: Rupees,
    /// Grand total as submitted.
    pub total: Rupees,
    /// Public URL of the uploaded payment-proof image.
    pub payment_proof_url: String,
    /// Receiver details the advance was transferred to, when configured.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receiver: Option<PaymentReceiver>,
    /// Current lifecycle status.
    pub status: OrderStatus,
    /// Checkout draft this order was finalized from, when it went through
    /// the draft flow. Doubles as the idempotency key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub draft_id: Option<CheckoutDraftId>,
    /// When the order was placed.
    pub created_at: DateTime<Utc>,
    /// When the order was last modified.
    pub updated_at: DateTime<Utc>,
}

/// Validated input for recording a captured order.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub form: CheckoutForm,
    pub items: Vec<OrderItem>,
    pub subtotal: Rupees,
    pub shipping: Rupees,
    pub total: Rupees,
    pub payment_proof_url: String,
    pub receiver: Option<PaymentReceiver>,
    pub draft_id: Option<CheckoutDraftId>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use unique_items_core::Rupees;

    #[test]
    fn test_order_item_lenient_deserialize() {
        // Only the id is present; everything else takes its default.
        let item: OrderItem = serde_json::from_str(r#"{"id": 7}"#).unwrap();
        assert_eq!(item.id, ProductId::new(7));
        assert_eq!(item.price, Rupees::ZERO);
        assert_eq!(item.qty, 1);
        assert!(item.slug.is_empty());
        assert!(item.color.is_none());
    }

    #[test]
    fn test_order_item_normalize_zero_qty() {
        let mut item: OrderItem = serde_json::from_str(r#"{"id": 7, "qty": 0}"#).unwrap();
        item.normalize();
        assert_eq!(item.qty, 1);
    }

    #[test]
    fn test_order_item_wire_field_names() {
        let item = OrderItem {
            id: ProductId::new(3),
            slug: "aurora-rose".to_string(),
            name: "Aurora Rose".to_string(),
            price: Rupees::new(4500),
            image_url: "https://cdn.example.com/aurora.jpg".to_string(),
            color: Some("rose gold".to_string()),
            qty: 2,
        };
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["imageUrl"], "https://cdn.example.com/aurora.jpg");
        assert_eq!(json["qty"], 2);
        assert_eq!(json["color"], "rose gold");
    }

    #[test]
    fn test_order_item_from_cart_line() {
        let line = CartLine {
            id: ProductId::new(9),
            slug: "noir-classic".to_string(),
            name: "Noir Classic".to_string(),
            price: Rupees::new(3200),
            image_url: String::new(),
            color: None,
            qty: 1,
        };
        let item = OrderItem::from(line);
        assert_eq!(item.id, ProductId::new(9));
        assert_eq!(item.qty, 1);
        assert!(item.color.is_none());
    }
}
