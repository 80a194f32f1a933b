//! Checkout draft handlers.
//!
//! A checkout is a two-step dance: the validated form and cart snapshot are
//! staged as a draft, the shopper uploads their payment proof, and the draft
//! is finalized into an order. The draft id is the idempotency key, so a
//! double-submitted finalize yields the already-created order instead of a
//! duplicate.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use unique_items_core::checkout::{
    ADVANCE_AMOUNT, CheckoutForm, SHIPPING_FEE, Totals, compute_totals, validate,
};
use unique_items_core::{CheckoutDraftId, OrderId, Rupees};

use crate::db::{CheckoutDraftRepository, OrderRepository, RepositoryError};
use crate::error::{AppError, Result, add_breadcrumb};
use crate::models::checkout_draft::{CheckoutDraft, DRAFT_TTL_HOURS, NewCheckoutDraft};
use crate::models::order::{NewOrder, OrderItem, PaymentReceiver};
use crate::services::cart_store::{CartStore, SessionCartStore};
use crate::state::AppState;

/// Request to stage a checkout.
#[derive(Debug, Deserialize)]
pub struct CreateDraftRequest {
    pub form: CheckoutForm,
}

/// Request to finalize a staged checkout.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinalizeDraftRequest {
    #[serde(default)]
    pub payment_proof_url: String,
}

/// Envelope for draft payloads.
#[derive(Debug, Serialize)]
pub struct DraftResponse {
    pub data: CheckoutDraft,
    pub payment: PaymentInstructions,
}

/// What the shopper transfers up front, and to whom.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentInstructions {
    pub advance_amount: Rupees,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receiver: Option<PaymentReceiver>,
}

/// The order a finalized draft resolved to.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinalizeResponse {
    pub order_id: OrderId,
}

/// Stage the current session cart and a validated form as a draft.
///
/// Totals are computed server-side from the cart snapshot; whatever numbers
/// the client saw are irrelevant here.
///
/// # Errors
///
/// Returns 400 when a required shipping field is blank or the cart is empty.
pub async fn create_draft(
    State(state): State<AppState>,
    session: Session,
    Json(body): Json<CreateDraftRequest>,
) -> Result<(StatusCode, Json<DraftResponse>)> {
    let cart = SessionCartStore::new(session).load().await;

    let mut form = body.form;
    form.trim();
    validate(&form, &cart).map_err(|e| AppError::Validation(e.to_string()))?;

    let totals = compute_totals(&cart);
    let items = cart.lines().iter().cloned().map(OrderItem::from).collect();

    let draft = CheckoutDraftRepository::new(state.pool())
        .create(&NewCheckoutDraft {
            id: CheckoutDraftId::generate(),
            form,
            items,
            subtotal: totals.subtotal,
            shipping: totals.shipping,
            total: totals.total,
            expires_at: Utc::now() + Duration::hours(DRAFT_TTL_HOURS),
        })
        .await?;

    let draft_id = draft.id.to_string();
    add_breadcrumb(
        "checkout",
        "Draft created",
        Some(&[("draft_id", draft_id.as_str())]),
    );

    Ok((
        StatusCode::CREATED,
        Json(DraftResponse {
            data: draft,
            payment: payment_instructions(&state),
        }),
    ))
}

/// Show a staged checkout for resume or pre-fill.
///
/// # Errors
///
/// Returns 404 when the draft is unknown or expired.
pub async fn show_draft(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DraftResponse>> {
    let id = parse_draft_id(&id)?;

    let draft = CheckoutDraftRepository::new(state.pool())
        .get(id)
        .await?
        .filter(|d| !d.is_expired(Utc::now()))
        .ok_or_else(|| AppError::NotFound("Draft not found".to_owned()))?;

    Ok(Json(DraftResponse {
        data: draft,
        payment: payment_instructions(&state),
    }))
}

/// Finalize a staged checkout into an order.
///
/// Totals are recomputed from the draft's frozen lines, the configured
/// receiver metadata is attached, and the session cart is cleared. Replays
/// answer 200 with the order already created for this draft.
///
/// # Errors
///
/// Returns 400 when the payment proof URL is missing and 404 when the draft
/// is unknown or expired.
pub async fn finalize_draft(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<String>,
    Json(body): Json<FinalizeDraftRequest>,
) -> Result<Response> {
    let id = parse_draft_id(&id)?;

    let proof = body.payment_proof_url.trim();
    if proof.is_empty() {
        return Err(AppError::Validation("Payment proof is required".to_owned()));
    }

    let drafts = CheckoutDraftRepository::new(state.pool());
    let orders = OrderRepository::new(state.pool());

    let draft = drafts
        .get(id)
        .await?
        .filter(|d| !d.is_expired(Utc::now()))
        .ok_or_else(|| AppError::NotFound("Draft not found".to_owned()))?;

    // Replay: the draft was already finalized.
    if let Some(existing) = orders.get_by_draft_id(draft.id).await? {
        return Ok(replay_response(existing.id));
    }

    let totals = frozen_totals(&draft.items);
    let new_order = NewOrder {
        form: draft.form,
        items: draft.items,
        subtotal: totals.subtotal,
        shipping: totals.shipping,
        total: totals.total,
        payment_proof_url: proof.to_owned(),
        receiver: state.config().receiver.as_ref().map(PaymentReceiver::from),
        draft_id: Some(id),
    };

    let order = match orders.create(&new_order).await {
        Ok(order) => order,
        // Lost a race with a concurrent finalize; answer with the winner.
        Err(RepositoryError::Conflict(_)) => {
            let existing = orders
                .get_by_draft_id(id)
                .await?
                .ok_or_else(|| AppError::Internal("finalized order not found".to_owned()))?;
            return Ok(replay_response(existing.id));
        }
        Err(e) => return Err(e.into()),
    };

    // The purchase went through; the session cart is done.
    let store = SessionCartStore::new(session);
    let mut cart = store.load().await;
    cart.clear();
    store.save(&cart).await?;

    let order_id = order.id.to_string();
    add_breadcrumb(
        "checkout",
        "Draft finalized",
        Some(&[("order_id", order_id.as_str())]),
    );

    Ok((
        StatusCode::CREATED,
        Json(FinalizeResponse { order_id: order.id }),
    )
        .into_response())
}

fn replay_response(order_id: OrderId) -> Response {
    (StatusCode::OK, Json(FinalizeResponse { order_id })).into_response()
}

/// Manual-transfer instructions shown alongside every draft payload.
fn payment_instructions(state: &AppState) -> PaymentInstructions {
    PaymentInstructions {
        advance_amount: ADVANCE_AMOUNT,
        receiver: state.config().receiver.as_ref().map(PaymentReceiver::from),
    }
}

/// A draft id that does not parse can never name a draft.
fn parse_draft_id(raw: &str) -> Result<CheckoutDraftId> {
    uuid::Uuid::parse_str(raw)
        .map(CheckoutDraftId::from)
        .map_err(|_| AppError::NotFound("Draft not found".to_owned()))
}

/// Quote a draft from its frozen lines, mirroring the cart quote rules.
fn frozen_totals(items: &[OrderItem]) -> Totals {
    let subtotal: Rupees = items.iter().map(|i| i.price.times(i.qty)).sum();
    let shipping = if items.is_empty() {
        Rupees::ZERO
    } else {
        SHIPPING_FEE
    };

    Totals {
        subtotal,
        shipping,
        total: subtotal + shipping,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use unique_items_core::ProductId;

    use super::*;

    fn item(price: i64, qty: u32) -> OrderItem {
        OrderItem {
            id: ProductId::new(1),
            slug: "chrono-steel".to_owned(),
            name: "Chrono Steel".to_owned(),
            price: Rupees::new(price),
            image_url: String::new(),
            color: None,
            qty,
        }
    }

    #[test]
    fn test_frozen_totals_empty() {
        let totals = frozen_totals(&[]);
        assert_eq!(totals.subtotal, Rupees::ZERO);
        assert_eq!(totals.shipping, Rupees::ZERO);
        assert_eq!(totals.total, Rupees::ZERO);
    }

    #[test]
    fn test_frozen_totals_adds_flat_shipping() {
        let totals = frozen_totals(&[item(2000, 1), item(250, 2)]);
        assert_eq!(totals.subtotal, Rupees::new(2500));
        assert_eq!(totals.shipping, SHIPPING_FEE);
        assert_eq!(totals.total, Rupees::new(2700));
    }

    #[test]
    fn test_parse_draft_id_rejects_garbage() {
        assert!(parse_draft_id("not-a-uuid").is_err());
        assert!(parse_draft_id("123").is_err());
        assert!(parse_draft_id("550e8400-e29b-41d4-a716-446655440000").is_ok());
    }
}
