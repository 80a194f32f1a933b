//! Admin product CRUD handlers.
//!
//! The admin listing sees every status; the public catalog handlers only
//! see published products.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Deserializer, Serialize};

use unique_items_core::cart::normalize_colors;
use unique_items_core::{ProductCategory, ProductCollection, ProductId, ProductStatus, Rupees};

use crate::db::products::ProductListFilter;
use crate::db::{ProductRepository, RepositoryError};
use crate::error::{AppError, Result};
use crate::middleware::RequireAdminAuth;
use crate::models::product::{NewProduct, Product, ProductChanges};
use crate::routes::products::{ProductResponse, ProductsResponse};
use crate::state::AppState;

/// Default and maximum page size for the admin listing.
const MAX_LIST_LIMIT: i64 = 200;

/// Query parameters for the admin product listing.
///
/// `slug` and `id` turn the listing into a single-record lookup; the other
/// parameters only apply to the list form.
#[derive(Debug, Default, Deserialize)]
pub struct AdminProductListQuery {
    pub slug: Option<String>,
    pub id: Option<String>,
    pub q: Option<String>,
    pub status: Option<String>,
    pub limit: Option<String>,
}

/// Request to create a product.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateProductRequest {
    pub name: String,
    pub slug: String,
    pub price: Option<Rupees>,
    pub old_price: Option<Rupees>,
    pub category: String,
    pub collection: String,
    pub description: String,
    pub images: Vec<String>,
    pub colors: Vec<String>,
    pub status: Option<String>,
    pub in_stock: Option<bool>,
}

/// Request to update a product. Absent fields leave columns untouched.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateProductRequest {
    pub name: Option<String>,
    pub price: Option<Rupees>,
    #[serde(deserialize_with = "double_option")]
    pub old_price: Option<Option<Rupees>>,
    pub category: Option<String>,
    pub collection: Option<String>,
    pub description: Option<String>,
    pub images: Option<Vec<String>>,
    pub colors: Option<Vec<String>>,
    pub status: Option<String>,
    pub in_stock: Option<bool>,
}

/// Response for a created or updated product.
#[derive(Debug, Serialize)]
pub struct ProductMutationResponse {
    pub message: &'static str,
    pub product: Product,
}

/// List products of any status, or look one up by `slug` or `id`.
///
/// # Errors
///
/// Returns 404 when a `slug`/`id` lookup matches nothing.
pub async fn list(
    RequireAdminAuth(_): RequireAdminAuth,
    State(state): State<AppState>,
    Query(params): Query<AdminProductListQuery>,
) -> Result<Response> {
    let repo = ProductRepository::new(state.pool());

    if let Some(slug) = trimmed(params.slug.as_deref()) {
        let product = repo
            .get_by_slug(slug)
            .await?
            .ok_or_else(|| AppError::NotFound("Product not found".to_owned()))?;
        return Ok(Json(ProductResponse { product }).into_response());
    }

    if let Some(id) = trimmed(params.id.as_deref()) {
        let product = repo
            .get_by_id(parse_product_id(id)?)
            .await?
            .ok_or_else(|| AppError::NotFound("Product not found".to_owned()))?;
        return Ok(Json(ProductResponse { product }).into_response());
    }

    let products = repo
        .list(&ProductListFilter {
            status: parse_status_filter(params.status.as_deref()),
            q: trimmed(params.q.as_deref()),
            limit: parse_limit(params.limit.as_deref()),
        })
        .await?;

    Ok(Json(ProductsResponse { products }).into_response())
}

/// Create a product.
///
/// # Errors
///
/// Returns 400 when a required field is missing or a category/collection
/// label is unknown, and 409 when the slug is already taken.
pub async fn create(
    RequireAdminAuth(_): RequireAdminAuth,
    State(state): State<AppState>,
    Json(body): Json<CreateProductRequest>,
) -> Result<(StatusCode, Json<ProductMutationResponse>)> {
    let name = body.name.trim();
    let slug = body.slug.trim().to_lowercase();
    let category = body.category.trim();
    let collection = body.collection.trim();

    let Some(price) = body.price else {
        return Err(AppError::Validation("Missing required fields".to_owned()));
    };
    if name.is_empty() || slug.is_empty() || category.is_empty() || collection.is_empty() {
        return Err(AppError::Validation("Missing required fields".to_owned()));
    }

    let category = category
        .parse::<ProductCategory>()
        .map_err(|_| AppError::Validation("Invalid category".to_owned()))?;
    let collection = collection
        .parse::<ProductCollection>()
        .map_err(|_| AppError::Validation("Invalid collection".to_owned()))?;

    let new = NewProduct {
        name: name.to_owned(),
        slug,
        price,
        old_price: body.old_price,
        category,
        collection,
        description: body.description,
        images: body.images,
        colors: normalize_colors(&body.colors),
        status: body.status.as_deref().map_or(ProductStatus::Published, coerce_status),
        in_stock: body.in_stock.unwrap_or(true),
    };

    let product = ProductRepository::new(state.pool())
        .create(&new)
        .await
        .map_err(|e| match e {
            RepositoryError::Conflict(_) => AppError::Conflict("Slug already exists".to_owned()),
            other => AppError::Database(other),
        })?;

    tracing::info!(product_id = %product.id, slug = %product.slug, "Product created");

    Ok((
        StatusCode::CREATED,
        Json(ProductMutationResponse {
            message: "Product created successfully",
            product,
        }),
    ))
}

/// Show one product of any status by id.
///
/// # Errors
///
/// Returns 404 when no product matches.
pub async fn show(
    RequireAdminAuth(_): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ProductResponse>> {
    let product = ProductRepository::new(state.pool())
        .get_by_id(parse_product_id(&id)?)
        .await?
        .ok_or_else(|| AppError::NotFound("Product not found".to_owned()))?;

    Ok(Json(ProductResponse { product }))
}

/// Apply a partial update to a product. The slug is immutable.
///
/// # Errors
///
/// Returns 400 for an empty patch or unknown category/collection label and
/// 404 when no product matches.
pub async fn update(
    RequireAdminAuth(_): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<UpdateProductRequest>,
) -> Result<Json<ProductMutationResponse>> {
    let id = parse_product_id(&id)?;

    let category = body
        .category
        .as_deref()
        .map(|raw| {
            raw.trim()
                .parse::<ProductCategory>()
                .map_err(|_| AppError::Validation("Invalid category".to_owned()))
        })
        .transpose()?;
    let collection = body
        .collection
        .as_deref()
        .map(|raw| {
            raw.trim()
                .parse::<ProductCollection>()
                .map_err(|_| AppError::Validation("Invalid collection".to_owned()))
        })
        .transpose()?;

    let changes = ProductChanges {
        name: body.name,
        price: body.price,
        old_price: body.old_price,
        category,
        collection,
        description: body.description,
        images: body.images,
        colors: body.colors.as_deref().map(normalize_colors),
        status: body.status.as_deref().map(coerce_status),
        in_stock: body.in_stock,
    };

    if changes.is_empty() {
        return Err(AppError::Validation("No fields to update".to_owned()));
    }

    let product = ProductRepository::new(state.pool())
        .update(id, &changes)
        .await
        .map_err(|e| match e {
            RepositoryError::NotFound => AppError::NotFound("Product not found".to_owned()),
            other => AppError::Database(other),
        })?;

    Ok(Json(ProductMutationResponse {
        message: "Product updated successfully",
        product,
    }))
}

/// Delete a product.
///
/// # Errors
///
/// Returns 404 when no product matches.
pub async fn delete(
    RequireAdminAuth(_): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>> {
    let id = parse_product_id(&id)?;

    ProductRepository::new(state.pool())
        .delete(id)
        .await
        .map_err(|e| match e {
            RepositoryError::NotFound => AppError::NotFound("Product not found".to_owned()),
            other => AppError::Database(other),
        })?;

    tracing::info!(product_id = %id, "Product deleted");

    Ok(Json(serde_json::json!({
        "message": "Product deleted successfully"
    })))
}

/// An id that does not parse can never name a product.
fn parse_product_id(raw: &str) -> Result<ProductId> {
    raw.parse::<i32>()
        .map(ProductId::new)
        .map_err(|_| AppError::NotFound("Product not found".to_owned()))
}

/// Non-empty trimmed form of an optional parameter.
fn trimmed(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|s| !s.is_empty())
}

/// Only the two known statuses filter; anything else lists every status.
fn parse_status_filter(raw: Option<&str>) -> Option<ProductStatus> {
    match raw.map(str::trim) {
        Some("published") => Some(ProductStatus::Published),
        Some("draft") => Some(ProductStatus::Draft),
        _ => None,
    }
}

/// Clamp the requested page size into `1..=MAX_LIST_LIMIT`.
fn parse_limit(raw: Option<&str>) -> i64 {
    raw.and_then(|s| s.trim().parse::<i64>().ok())
        .map_or(MAX_LIST_LIMIT, |n| n.clamp(1, MAX_LIST_LIMIT))
}

/// Anything other than `draft` publishes.
fn coerce_status(raw: &str) -> ProductStatus {
    if raw == "draft" {
        ProductStatus::Draft
    } else {
        ProductStatus::Published
    }
}

/// Distinguishes an absent `oldPrice` (leave it) from an explicit null
/// (clear it).
fn double_option<'de, T, D>(de: D) -> std::result::Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(de).map(Some)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_product_id() {
        assert_eq!(parse_product_id("42").unwrap(), ProductId::new(42));
        assert!(parse_product_id("42abc").is_err());
        assert!(parse_product_id("6655f2a1c1d5e9a3b8f0c111").is_err());
    }

    #[test]
    fn test_parse_status_filter() {
        assert_eq!(
            parse_status_filter(Some("published")),
            Some(ProductStatus::Published)
        );
        assert_eq!(
            parse_status_filter(Some(" draft ")),
            Some(ProductStatus::Draft)
        );
        assert_eq!(parse_status_filter(Some("archived")), None);
        assert_eq!(parse_status_filter(None), None);
    }

    #[test]
    fn test_parse_limit_clamps() {
        assert_eq!(parse_limit(None), 200);
        assert_eq!(parse_limit(Some("50")), 50);
        assert_eq!(parse_limit(Some("0")), 1);
        assert_eq!(parse_limit(Some("5000")), 200);
        assert_eq!(parse_limit(Some("many")), 200);
    }

    #[test]
    fn test_coerce_status() {
        assert_eq!(coerce_status("draft"), ProductStatus::Draft);
        assert_eq!(coerce_status("published"), ProductStatus::Published);
        assert_eq!(coerce_status("anything"), ProductStatus::Published);
    }

    #[test]
    fn test_update_request_old_price_forms() {
        let absent: UpdateProductRequest = serde_json::from_value(serde_json::json!({})).unwrap();
        assert_eq!(absent.old_price, None);

        let cleared: UpdateProductRequest =
            serde_json::from_value(serde_json::json!({ "oldPrice": null })).unwrap();
        assert_eq!(cleared.old_price, Some(None));

        let set: UpdateProductRequest =
            serde_json::from_value(serde_json::json!({ "oldPrice": 3500 })).unwrap();
        assert_eq!(set.old_price, Some(Some(Rupees::new(3500))));
    }
}
