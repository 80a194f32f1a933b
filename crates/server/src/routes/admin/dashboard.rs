//! Admin dashboard metrics handler.

use axum::{Json, extract::State};
use chrono::{DateTime, NaiveTime, Utc};
use serde::Serialize;

use unique_items_core::checkout::CheckoutForm;
use unique_items_core::{OrderId, OrderStatus, Rupees};

use crate::db::{OrderRepository, ProductRepository};
use crate::error::Result;
use crate::middleware::RequireAdminAuth;
use crate::models::order::Order;
use crate::state::AppState;

/// Number of orders shown in the recent-orders panel.
const RECENT_ORDERS: i64 = 6;

/// Condensed order row for the recent-orders panel.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentOrderSummary {
    pub id: OrderId,
    pub form: CheckoutForm,
    pub total: Rupees,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

impl From<Order> for RecentOrderSummary {
    fn from(order: Order) -> Self {
        Self {
            id: order.id,
            form: order.form,
            total: order.total,
            status: order.status,
            created_at: order.created_at,
        }
    }
}

/// Dashboard metrics.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardData {
    pub total_orders: i64,
    pub total_products: i64,
    /// Customer accounts do not exist; the console's layout expects the
    /// field, so it is always zero.
    pub total_customers: i64,
    /// Sum of order totals excluding cancelled and rejected orders.
    pub revenue: Rupees,
    pub products_out_of_stock: i64,
    pub pending_orders: i64,
    /// Orders dispatched with `created_at` on or after midnight UTC today.
    pub dispatched_today: i64,
    pub recent_orders: Vec<RecentOrderSummary>,
}

/// Response envelope for the dashboard.
#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub data: DashboardData,
}

/// Aggregate store metrics for the admin landing page.
///
/// # Errors
///
/// Returns an error if any of the aggregate queries fail.
pub async fn show(
    RequireAdminAuth(_): RequireAdminAuth,
    State(state): State<AppState>,
) -> Result<Json<DashboardResponse>> {
    let orders = OrderRepository::new(state.pool());
    let products = ProductRepository::new(state.pool());

    let start_of_today = Utc::now().date_naive().and_time(NaiveTime::MIN).and_utc();

    let total_orders = orders.count().await?;
    let total_products = products.count().await?;
    let revenue = orders.revenue().await?;
    let products_out_of_stock = products.count_out_of_stock().await?;
    let pending_orders = orders
        .count_by_status(OrderStatus::PendingVerification)
        .await?;
    let dispatched_today = orders
        .count_by_status_since(OrderStatus::Dispatched, start_of_today)
        .await?;
    let recent_orders = orders
        .recent(RECENT_ORDERS)
        .await?
        .into_iter()
        .map(RecentOrderSummary::from)
        .collect();

    Ok(Json(DashboardResponse {
        data: DashboardData {
            total_orders,
            total_products,
            total_customers: 0,
            revenue,
            products_out_of_stock,
            pending_orders,
            dispatched_today,
            recent_orders,
        },
    }))
}
