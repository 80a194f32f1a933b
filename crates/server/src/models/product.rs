//! Catalog product domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use unique_items_core::{ProductCategory, ProductCollection, ProductId, ProductStatus, Rupees};

/// A catalog product (domain type).
///
/// Serializes in the camelCase wire form the storefront consumes.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique product ID.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// URL-safe unique slug.
    pub slug: String,
    /// Current price in whole rupees.
    pub price: Rupees,
    /// Compare-at price shown struck through, when on sale.
    pub old_price: Option<Rupees>,
    /// Catalog category.
    pub category: ProductCategory,
    /// Curated collection.
    pub collection: ProductCollection,
    /// Free-text description.
    pub description: String,
    /// Image URLs; the first is the cover image.
    pub images: Vec<String>,
    /// Available color labels, lower-cased and de-duplicated.
    pub colors: Vec<String>,
    /// Publication status.
    pub status: ProductStatus,
    /// Whether the product can currently be ordered.
    pub in_stock: bool,
    /// When the product was created.
    pub created_at: DateTime<Utc>,
    /// When the product was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// The cover image URL, when any image is set.
    #[must_use]
    pub fn cover_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }

    /// Whether adding this product to a cart requires a color choice.
    #[must_use]
    pub fn requires_color(&self) -> bool {
        !self.colors.is_empty()
    }
}

/// Validated input for creating a product.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub slug: String,
    pub price: Rupees,
    pub old_price: Option<Rupees>,
    pub category: ProductCategory,
    pub collection: ProductCollection,
    pub description: String,
    pub images: Vec<String>,
    pub colors: Vec<String>,
    pub status: ProductStatus,
    pub in_stock: bool,
}

/// Field-level changes for a product update.
///
/// `None` leaves a column untouched. `old_price` is doubly optional to
/// distinguish "leave as is" (`None`) from "clear the compare-at price"
/// (`Some(None)`). The slug is immutable after creation.
#[derive(Debug, Clone, Default)]
pub struct ProductChanges {
    pub name: Option<String>,
    pub price: Option<Rupees>,
    pub old_price: Option<Option<Rupees>>,
    pub category: Option<ProductCategory>,
    pub collection: Option<ProductCollection>,
    pub description: Option<String>,
    pub images: Option<Vec<String>>,
    pub colors: Option<Vec<String>>,
    pub status: Option<ProductStatus>,
    pub in_stock: Option<bool>,
}

impl ProductChanges {
    /// Whether the patch changes nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.price.is_none()
            && self.old_price.is_none()
            && self.category.is_none()
            && self.collection.is_none()
            && self.description.is_none()
            && self.images.is_none()
            && self.colors.is_none()
            && self.status.is_none()
            && self.in_stock.is_none()
    }
}
