//! The shopper's cart.
//!
//! A cart is a list of lines, each keyed by (product id, normalized color).
//! Adding the same pair again increments the existing line; a product picked
//! in two different colors occupies two lines. All operations are pure; where
//! the cart lives (session, memory) is the caller's concern.
//!
//! Field names serialize in the wire form the storefront has always used
//! (`id`, `imageUrl`, `qty`), so a stored cart round-trips unchanged.

use serde::{Deserialize, Serialize};

use crate::types::{ProductId, Rupees};

/// Normalize a color label for keying and storage: trimmed, lower-cased,
/// `None` when empty.
#[must_use]
pub fn normalize_color(color: Option<&str>) -> Option<String> {
    let c = color?.trim().to_lowercase();
    if c.is_empty() { None } else { Some(c) }
}

/// Normalize a product's color list: each label trimmed and lower-cased,
/// empties dropped, duplicates removed, first occurrence order kept.
#[must_use]
pub fn normalize_colors(colors: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(colors.len());
    for color in colors {
        if let Some(c) = normalize_color(Some(color)) {
            if !out.contains(&c) {
                out.push(c);
            }
        }
    }
    out
}

/// One cart line: a frozen snapshot of the product at the moment it was
/// added, plus the chosen color and quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub id: ProductId,
    pub slug: String,
    pub name: String,
    pub price: Rupees,
    pub image_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    pub qty: u32,
}

impl CartLine {
    /// The line's price contribution: unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Rupees {
        self.price.times(self.qty)
    }
}

/// The cart itself. Serializes as a bare array of lines.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// An empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// All lines, in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn count(&self) -> u32 {
        self.lines.iter().map(|l| l.qty).sum()
    }

    /// Sum of line totals.
    #[must_use]
    pub fn subtotal(&self) -> Rupees {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Find the line for a (product, color) pair.
    #[must_use]
    pub fn line(&self, id: ProductId, color: Option<&str>) -> Option<&CartLine> {
        let key = normalize_color(color);
        self.lines.iter().find(|l| l.id == id && l.color == key)
    }

    /// Add a line. If a line with the same (product, color) key already
    /// exists its quantity grows by the incoming quantity; otherwise the line
    /// is appended with its color normalized. A zero incoming quantity is
    /// treated as one.
    pub fn add(&mut self, mut line: CartLine) {
        line.color = normalize_color(line.color.as_deref());
        if line.qty == 0 {
            line.qty = 1;
        }
        if let Some(existing) = self
            .lines
            .iter_mut()
            .find(|l| l.id == line.id && l.color == line.color)
        {
            existing.qty = existing.qty.saturating_add(line.qty);
        } else {
            self.lines.push(line);
        }
    }

    /// Adjust a line's quantity by `delta`, clamping at a minimum of one.
    /// A line never leaves the cart through decrementing; eviction is
    /// [`Cart::remove`]'s job. Unknown keys are a no-op.
    pub fn update_quantity(&mut self, id: ProductId, color: Option<&str>, delta: i64) {
        let key = normalize_color(color);
        if let Some(line) = self.lines.iter_mut().find(|l| l.id == id && l.color == key) {
            let next = i64::from(line.qty).saturating_add(delta).max(1);
            line.qty = u32::try_from(next).unwrap_or(u32::MAX);
        }
    }

    /// Remove the line for a (product, color) pair, if present.
    pub fn remove(&mut self, id: ProductId, color: Option<&str>) {
        let key = normalize_color(color);
        self.lines.retain(|l| !(l.id == id && l.color == key));
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.lines.clear();
    }
}
