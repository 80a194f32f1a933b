//! Session cart handlers.
//!
//! The cart lives server-side in the visitor's session. Lines snapshot the
//! product name, price, and cover image at add time; a price change in the
//! catalog does not ripple into carts already holding the product.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use unique_items_core::cart::{Cart, CartLine, normalize_color};
use unique_items_core::checkout::compute_totals;
use unique_items_core::{ProductId, ProductStatus, Rupees};

use crate::db::ProductRepository;
use crate::error::{AppError, Result};
use crate::services::cart_store::{CartStore, SessionCartStore};
use crate::state::AppState;

/// Request to add a product to the cart.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddCartItemRequest {
    pub product_id: ProductId,
    pub color: Option<String>,
    pub quantity: Option<u32>,
}

/// Request to adjust a line's quantity.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCartItemRequest {
    pub product_id: ProductId,
    pub color: Option<String>,
    pub delta: i64,
}

/// Request to remove a line.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveCartItemRequest {
    pub product_id: ProductId,
    pub color: Option<String>,
}

/// Cart contents plus the quoted totals.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartView {
    pub items: Vec<CartLine>,
    pub count: u32,
    pub subtotal: Rupees,
    pub shipping: Rupees,
    pub total: Rupees,
}

impl CartView {
    fn from_cart(cart: &Cart) -> Self {
        let totals = compute_totals(cart);
        Self {
            items: cart.lines().to_vec(),
            count: cart.count(),
            subtotal: totals.subtotal,
            shipping: totals.shipping,
            total: totals.total,
        }
    }
}

/// Show the current cart.
pub async fn show(session: Session) -> Json<CartView> {
    let cart = SessionCartStore::new(session).load().await;

    Json(CartView::from_cart(&cart))
}

/// Add a product to the cart.
///
/// The product must exist and be published. When the product carries colors
/// a color choice is required and must be one of them; otherwise any
/// submitted color is dropped.
///
/// # Errors
///
/// Returns 404 for an unknown or unpublished product and 400 for a missing
/// or unknown color.
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Json(body): Json<AddCartItemRequest>,
) -> Result<Json<CartView>> {
    let product = ProductRepository::new(state.pool())
        .get_by_id(body.product_id)
        .await?
        .filter(|p| p.status == ProductStatus::Published)
        .ok_or_else(|| AppError::NotFound("Product not found".to_owned()))?;

    let color = if product.colors.is_empty() {
        None
    } else {
        let chosen = normalize_color(body.color.as_deref()).ok_or_else(|| {
            AppError::Validation("Color selection is required".to_owned())
        })?;
        if !product.colors.iter().any(|c| *c == chosen) {
            return Err(AppError::Validation("Invalid color".to_owned()));
        }
        Some(chosen)
    };

    let store = SessionCartStore::new(session);
    let mut cart = store.load().await;

    cart.add(CartLine {
        id: product.id,
        slug: product.slug.clone(),
        name: product.name.clone(),
        price: product.price,
        image_url: product.cover_image().unwrap_or_default().to_owned(),
        color,
        qty: body.quantity.unwrap_or(1),
    });

    store.save(&cart).await?;

    Ok(Json(CartView::from_cart(&cart)))
}

/// Adjust a line's quantity by a delta. Unknown lines are a no-op.
///
/// # Errors
///
/// Returns an error if the session cannot be written.
pub async fn update(
    session: Session,
    Json(body): Json<UpdateCartItemRequest>,
) -> Result<Json<CartView>> {
    let store = SessionCartStore::new(session);
    let mut cart = store.load().await;

    cart.update_quantity(body.product_id, body.color.as_deref(), body.delta);
    store.save(&cart).await?;

    Ok(Json(CartView::from_cart(&cart)))
}

/// Remove a line. Unknown lines are a no-op.
///
/// # Errors
///
/// Returns an error if the session cannot be written.
pub async fn remove(
    session: Session,
    Json(body): Json<RemoveCartItemRequest>,
) -> Result<Json<CartView>> {
    let store = SessionCartStore::new(session);
    let mut cart = store.load().await;

    cart.remove(body.product_id, body.color.as_deref());
    store.save(&cart).await?;

    Ok(Json(CartView::from_cart(&cart)))
}

/// Empty the cart.
///
/// # Errors
///
/// Returns an error if the session cannot be written.
pub async fn clear(session: Session) -> Result<Json<CartView>> {
    let store = SessionCartStore::new(session);
    let mut cart = store.load().await;

    cart.clear();
    store.save(&cart).await?;

    Ok(Json(CartView::from_cart(&cart)))
}
