//! Order capture and management handlers.
//!
//! `POST /api/orders` is the direct capture endpoint: it stores the totals
//! the client submitted, trusting them as the original surface did. The
//! draft-finalize flow in [`crate::routes::checkout`] is the path that
//! recomputes everything server-side.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use unique_items_core::checkout::CheckoutForm;
use unique_items_core::{OrderId, OrderStatus, Rupees};

use crate::db::orders::OrderListFilter;
use crate::db::{OrderRepository, RepositoryError};
use crate::error::{AppError, Result, add_breadcrumb};
use crate::models::order::{NewOrder, Order, OrderItem, PaymentReceiver};
use crate::state::AppState;

/// Request to capture an order directly.
///
/// Every field is optional on the wire; validation decides what is fatal.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub form: Option<CheckoutForm>,
    #[serde(default)]
    pub items: Vec<OrderItem>,
    pub subtotal: Option<Rupees>,
    pub shipping: Option<Rupees>,
    pub total: Option<Rupees>,
    pub payment_proof_url: Option<String>,
    pub receiver: Option<PaymentReceiver>,
}

/// Query parameters for the order listing.
#[derive(Debug, Default, Deserialize)]
pub struct OrderListQuery {
    pub q: Option<String>,
    pub status: Option<String>,
}

/// Request to move an order to a new status.
#[derive(Debug, Deserialize)]
pub struct UpdateOrderStatusRequest {
    pub status: Option<String>,
}

/// Response for a captured order.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderCreatedResponse {
    pub message: &'static str,
    pub order_id: OrderId,
}

/// Response for the order listing.
#[derive(Debug, Serialize)]
pub struct OrdersResponse {
    pub orders: Vec<Order>,
}

/// Response for a single order.
#[derive(Debug, Serialize)]
pub struct OrderResponse {
    pub order: Order,
}

/// Capture an order.
///
/// # Errors
///
/// Returns 400 when the form, items, or payment proof are missing, or when
/// any required shipping field is blank after trimming.
pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<CreateOrderRequest>,
) -> Result<(StatusCode, Json<OrderCreatedResponse>)> {
    let mut form = body
        .form
        .ok_or_else(|| AppError::Validation("Missing form".to_owned()))?;

    if body.items.is_empty() {
        return Err(AppError::Validation("Cart is empty".to_owned()));
    }

    let payment_proof_url = body
        .payment_proof_url
        .filter(|url| !url.is_empty())
        .ok_or_else(|| AppError::Validation("Payment proof is required".to_owned()))?;

    form.trim();
    let required = [
        &form.first_name,
        &form.last_name,
        &form.phone,
        &form.address,
        &form.city,
    ];
    if required.iter().any(|field| field.is_empty()) {
        return Err(AppError::Validation(
            "Please complete shipping details".to_owned(),
        ));
    }

    let mut items = body.items;
    for item in &mut items {
        item.normalize();
    }

    let new_order = NewOrder {
        form,
        items,
        subtotal: body.subtotal.unwrap_or_default(),
        shipping: body.shipping.unwrap_or_default(),
        total: body.total.unwrap_or_default(),
        payment_proof_url,
        receiver: body.receiver,
        draft_id: None,
    };

    let order = OrderRepository::new(state.pool()).create(&new_order).await?;

    let order_id = order.id.to_string();
    add_breadcrumb(
        "orders",
        "Order captured",
        Some(&[("order_id", order_id.as_str())]),
    );

    Ok((
        StatusCode::CREATED,
        Json(OrderCreatedResponse {
            message: "Order created",
            order_id: order.id,
        }),
    ))
}

/// List orders, newest first, capped at 200.
///
/// `status` filters exactly unless absent or `all`; `q` is a
/// case-insensitive substring over customer name, phone, and proof URL.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<OrderListQuery>,
) -> Result<Json<OrdersResponse>> {
    let status = match normalized_status(params.status.as_deref()) {
        StatusFilter::All => None,
        StatusFilter::Exact(status) => Some(status),
        // An unknown status can never match a stored row.
        StatusFilter::MatchesNothing => {
            return Ok(Json(OrdersResponse { orders: Vec::new() }));
        }
    };

    let q = params.q.as_deref().map(str::trim).filter(|q| !q.is_empty());

    let orders = OrderRepository::new(state.pool())
        .list(&OrderListFilter { status, q })
        .await?;

    Ok(Json(OrdersResponse { orders }))
}

/// Show one order.
///
/// # Errors
///
/// Returns 400 for a non-numeric id and 404 when no order matches.
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<OrderResponse>> {
    let id = parse_order_id(&id)?;

    let order = OrderRepository::new(state.pool())
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Order not found".to_owned()))?;

    Ok(Json(OrderResponse { order }))
}

/// Move an order to a new status.
///
/// Any of the six statuses is accepted regardless of the current one; a
/// move off the conventional progression is logged but not refused.
///
/// # Errors
///
/// Returns 400 for a non-numeric id or unknown status and 404 when no order
/// matches.
pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<UpdateOrderStatusRequest>,
) -> Result<Json<serde_json::Value>> {
    let id = parse_order_id(&id)?;

    let status = body
        .status
        .as_deref()
        .map(str::trim)
        .and_then(|s| s.parse::<OrderStatus>().ok())
        .ok_or_else(|| AppError::Validation("Invalid status".to_owned()))?;

    let orders = OrderRepository::new(state.pool());

    let order = orders
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Order not found".to_owned()))?;

    if !order.status.is_conventional_transition(status) {
        tracing::warn!(
            order_id = %id,
            from = %order.status,
            to = %status,
            "Unconventional order status transition"
        );
    }

    orders.update_status(id, status).await.map_err(|e| match e {
        RepositoryError::NotFound => AppError::NotFound("Order not found".to_owned()),
        other => AppError::Database(other),
    })?;

    Ok(Json(serde_json::json!({ "message": "Status updated" })))
}

/// How a raw `status` query value filters the listing.
enum StatusFilter {
    All,
    Exact(OrderStatus),
    MatchesNothing,
}

fn normalized_status(raw: Option<&str>) -> StatusFilter {
    let raw = raw.unwrap_or("all").trim().to_lowercase();
    if raw.is_empty() || raw == "all" {
        return StatusFilter::All;
    }
    raw.parse::<OrderStatus>()
        .map_or(StatusFilter::MatchesNothing, StatusFilter::Exact)
}

/// A non-numeric id can never name an order.
fn parse_order_id(raw: &str) -> Result<OrderId> {
    raw.parse::<i32>()
        .map(OrderId::new)
        .map_err(|_| AppError::Validation("Invalid order id".to_owned()))
}
