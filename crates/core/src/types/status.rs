//! Status and classification enums for catalog and order entities.
//!
//! All enums serialize to the lowercase snake_case strings that the HTTP API
//! and the database use, so a value round-trips unchanged between JSON, TEXT
//! columns, and Rust.

use serde::{Deserialize, Deserializer, Serialize};

/// Order lifecycle status.
///
/// The update endpoint accepts any of the six values regardless of the
/// current status; [`OrderStatus::intended_next`] records the conventional
/// progression for display and logging, but it is not enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    PendingVerification,
    Processing,
    Dispatched,
    Delivered,
    Cancelled,
    Rejected,
}

impl OrderStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [Self; 6] = [
        Self::PendingVerification,
        Self::Processing,
        Self::Dispatched,
        Self::Delivered,
        Self::Cancelled,
        Self::Rejected,
    ];

    /// The snake_case wire/storage form.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::PendingVerification => "pending_verification",
            Self::Processing => "processing",
            Self::Dispatched => "dispatched",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
            Self::Rejected => "rejected",
        }
    }

    /// The statuses an order in this state conventionally moves to next.
    ///
    /// Cancellation and rejection are reachable from any non-terminal state;
    /// delivered, cancelled, and rejected are terminal.
    #[must_use]
    pub const fn intended_next(&self) -> &'static [Self] {
        match self {
            Self::PendingVerification => &[Self::Processing, Self::Cancelled, Self::Rejected],
            Self::Processing => &[Self::Dispatched, Self::Cancelled, Self::Rejected],
            Self::Dispatched => &[Self::Delivered, Self::Cancelled, Self::Rejected],
            Self::Delivered | Self::Cancelled | Self::Rejected => &[],
        }
    }

    /// Whether moving from `self` to `next` follows the conventional
    /// progression. Unconventional moves are permitted, only logged.
    #[must_use]
    pub fn is_conventional_transition(&self, next: Self) -> bool {
        self.intended_next().contains(&next)
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending_verification" => Ok(Self::PendingVerification),
            "processing" => Ok(Self::Processing),
            "dispatched" => Ok(Self::Dispatched),
            "delivered" => Ok(Self::Delivered),
            "cancelled" => Ok(Self::Cancelled),
            "rejected" => Ok(Self::Rejected),
            _ => Err(format!("invalid order status: {s}")),
        }
    }
}

/// Product publication status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ProductStatus {
    #[default]
    Published,
    Draft,
}

impl ProductStatus {
    /// The snake_case wire/storage form.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Published => "published",
            Self::Draft => "draft",
        }
    }
}

impl std::fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ProductStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "published" => Ok(Self::Published),
            "draft" => Ok(Self::Draft),
            _ => Err(format!("invalid product status: {s}")),
        }
    }
}

/// Contact message triage status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ContactStatus {
    #[default]
    New,
    Replied,
}

impl ContactStatus {
    /// The snake_case wire/storage form.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Replied => "replied",
        }
    }
}

impl std::fmt::Display for ContactStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ContactStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "new" => Ok(Self::New),
            "replied" => Ok(Self::Replied),
            _ => Err(format!("invalid contact status: {s}")),
        }
    }
}

/// Catalog category a watch is filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductCategory {
    Men,
    Women,
    Kids,
    Sport,
    Couplewatches,
}

impl ProductCategory {
    /// The snake_case wire/storage form.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Men => "men",
            Self::Women => "women",
            Self::Kids => "kids",
            Self::Sport => "sport",
            Self::Couplewatches => "couplewatches",
        }
    }
}

impl std::fmt::Display for ProductCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ProductCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "men" => Ok(Self::Men),
            "women" => Ok(Self::Women),
            "kids" => Ok(Self::Kids),
            "sport" => Ok(Self::Sport),
            "couplewatches" => Ok(Self::Couplewatches),
            _ => Err(format!("invalid product category: {s}")),
        }
    }
}

/// Curated collection a watch belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductCollection {
    Classic,
    Minimal,
    Luxury,
    Sport,
}

impl ProductCollection {
    /// The snake_case wire/storage form.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Classic => "classic",
            Self::Minimal => "minimal",
            Self::Luxury => "luxury",
            Self::Sport => "sport",
        }
    }
}

impl std::fmt::Display for ProductCollection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ProductCollection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "classic" => Ok(Self::Classic),
            "minimal" => Ok(Self::Minimal),
            "luxury" => Ok(Self::Luxury),
            "sport" => Ok(Self::Sport),
            _ => Err(format!("invalid product collection: {s}")),
        }
    }
}

/// How the shopper intends to pay.
///
/// Only cash-on-delivery is operational; "online" is recorded but never
/// charged. Deserialization coerces any unrecognized value to COD, matching
/// how submitted forms have always been ingested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    #[default]
    Cod,
    Online,
}

impl PaymentMethod {
    /// The snake_case wire/storage form.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Cod => "cod",
            Self::Online => "online",
        }
    }

    /// Lenient parse: `"online"` maps to `Online`, everything else to `Cod`.
    #[must_use]
    pub fn from_loose(s: &str) -> Self {
        if s == "online" { Self::Online } else { Self::Cod }
    }
}

impl<'de> Deserialize<'de> for PaymentMethod {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Self::from_loose(&s))
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_order_status_serde_roundtrip() {
        for status in OrderStatus::ALL {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{status}\""));
            let parsed: OrderStatus = serde_json::from_str(&json).unwrap();
            assert_eq!(parsed, status);
        }
    }

    #[test]
    fn test_order_status_rejects_unknown() {
        assert!(OrderStatus::from_str("shipped").is_err());
        assert!(OrderStatus::from_str("").is_err());
        assert!(serde_json::from_str::<OrderStatus>("\"Pending_Verification\"").is_err());
    }

    #[test]
    fn test_order_status_wire_form() {
        assert_eq!(
            OrderStatus::PendingVerification.as_str(),
            "pending_verification"
        );
        assert_eq!(
            OrderStatus::from_str("dispatched").unwrap(),
            OrderStatus::Dispatched
        );
    }

    #[test]
    fn test_intended_progression() {
        assert!(
            OrderStatus::PendingVerification.is_conventional_transition(OrderStatus::Processing)
        );
        assert!(OrderStatus::Processing.is_conventional_transition(OrderStatus::Cancelled));
        assert!(OrderStatus::Dispatched.is_conventional_transition(OrderStatus::Delivered));
        // Terminal states go nowhere, and skipping ahead is unconventional.
        assert!(!OrderStatus::Delivered.is_conventional_transition(OrderStatus::Processing));
        assert!(
            !OrderStatus::PendingVerification.is_conventional_transition(OrderStatus::Delivered)
        );
    }

    #[test]
    fn test_product_status_parse() {
        assert_eq!(
            ProductStatus::from_str("draft").unwrap(),
            ProductStatus::Draft
        );
        assert!(ProductStatus::from_str("archived").is_err());
    }

    #[test]
    fn test_category_and_collection_parse() {
        assert_eq!(
            ProductCategory::from_str("couplewatches").unwrap(),
            ProductCategory::Couplewatches
        );
        assert!(ProductCategory::from_str("unisex").is_err());
        assert_eq!(
            ProductCollection::from_str("luxury").unwrap(),
            ProductCollection::Luxury
        );
        assert!(ProductCollection::from_str("vintage").is_err());
    }

    #[test]
    fn test_payment_method_coerces_to_cod() {
        assert_eq!(PaymentMethod::from_loose("online"), PaymentMethod::Online);
        assert_eq!(PaymentMethod::from_loose("cod"), PaymentMethod::Cod);
        assert_eq!(PaymentMethod::from_loose("bitcoin"), PaymentMethod::Cod);

        let parsed: PaymentMethod = serde_json::from_str("\"online\"").unwrap();
        assert_eq!(parsed, PaymentMethod::Online);
        let coerced: PaymentMethod = serde_json::from_str("\"card\"").unwrap();
        assert_eq!(coerced, PaymentMethod::Cod);
    }
}
