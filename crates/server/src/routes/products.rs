//! Public catalog handlers.
//!
//! Only published products are visible here; drafts exist solely for the
//! admin console.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;

use crate::db::ProductRepository;
use crate::error::{AppError, Result};
use crate::models::product::Product;
use crate::state::AppState;

/// Response for the catalog listing.
#[derive(Debug, Serialize)]
pub struct ProductsResponse {
    pub products: Vec<Product>,
}

/// Response for a single catalog entry.
#[derive(Debug, Serialize)]
pub struct ProductResponse {
    pub product: Product,
}

/// List published products, newest first.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub async fn index(State(state): State<AppState>) -> Result<Json<ProductsResponse>> {
    let products = ProductRepository::new(state.pool()).list_published().await?;

    Ok(Json(ProductsResponse { products }))
}

/// Show one published product by slug.
///
/// # Errors
///
/// Returns 404 if no published product has the given slug.
pub async fn show(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<ProductResponse>> {
    let product = ProductRepository::new(state.pool())
        .get_published_by_slug(&slug)
        .await?
        .ok_or_else(|| AppError::NotFound("Product not found".to_owned()))?;

    Ok(Json(ProductResponse { product }))
}
