//! HTTP route handlers for the store API.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health                      - Liveness probe (main.rs)
//! GET    /health/ready                - Readiness probe (main.rs)
//!
//! # Catalog
//! GET    /api/products                - Published products
//! GET    /api/products/{slug}         - Published product detail
//!
//! # Cart (session-backed)
//! GET    /api/cart                    - Cart with totals
//! POST   /api/cart/items              - Add a line
//! PATCH  /api/cart/items              - Adjust a line quantity
//! DELETE /api/cart/items              - Remove a line
//! DELETE /api/cart                    - Empty the cart
//!
//! # Checkout
//! POST   /api/checkout/drafts               - Stage the cart as a draft
//! GET    /api/checkout/drafts/{id}          - Fetch a live draft
//! POST   /api/checkout/drafts/{id}/finalize - Attach proof, place the order
//!
//! # Upload
//! POST   /api/upload                  - Payment-proof image upload
//!
//! # Orders
//! POST   /api/orders                  - Direct order capture
//! GET    /api/orders                  - List orders (q, status)
//! GET    /api/orders/{id}             - Order detail
//! PATCH  /api/orders/{id}             - Overwrite order status
//!
//! # Contact
//! POST   /api/contact                 - Submit a message
//! GET    /api/contact                 - List messages (q, status)
//! PATCH  /api/contact/{id}            - Triage (new|replied)
//! DELETE /api/contact/{id}            - Delete a message
//!
//! # Admin (session auth; login and seed are open)
//! POST   /api/admin/login             - Password login
//! POST   /api/admin/logout            - Clear the session
//! POST   /api/admin/seed              - Secret-gated first-admin bootstrap
//! GET    /api/admin/products          - Any-status listing (slug/id lookup)
//! POST   /api/admin/products          - Create a product
//! GET    /api/admin/products/{id}     - Product of any status
//! PATCH  /api/admin/products/{id}     - Partial update
//! DELETE /api/admin/products/{id}     - Delete a product
//! GET    /api/admin/dashboard         - Store metrics
//! ```

pub mod admin;
pub mod cart;
pub mod checkout;
pub mod contact;
pub mod orders;
pub mod products;
pub mod upload;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the catalog routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/{slug}", get(products::show))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show).delete(cart::clear))
        .route(
            "/items",
            post(cart::add).patch(cart::update).delete(cart::remove),
        )
}

/// Create the checkout draft routes router.
pub fn checkout_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(checkout::create_draft))
        .route("/{id}", get(checkout::show_draft))
        .route("/{id}/finalize", post(checkout::finalize_draft))
}

/// Create the order routes router.
pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(orders::create).get(orders::list))
        .route("/{id}", get(orders::show).patch(orders::update_status))
}

/// Create the contact routes router.
pub fn contact_routes() -> Router<AppState> {
    use axum::routing::patch;

    Router::new()
        .route("/", post(contact::create).get(contact::list))
        .route(
            "/{id}",
            patch(contact::update_status).delete(contact::delete),
        )
}

/// Create all API routes for the server.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/api/products", product_routes())
        .nest("/api/cart", cart_routes())
        .nest("/api/checkout/drafts", checkout_routes())
        .route("/api/upload", post(upload::create))
        .nest("/api/orders", order_routes())
        .nest("/api/contact", contact_routes())
        .nest("/api/admin", admin::admin_routes())
}
