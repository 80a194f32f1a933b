//! Integration tests for the session cart.
//!
//! These tests require:
//! - A running `PostgreSQL` database with migrations applied
//! - The server running (cargo run -p unique-items-server)
//! - Seed admin credentials in the environment (`ADMIN_SEED_SECRET`,
//!   `ADMIN_EMAIL`, `ADMIN_PASSWORD`) matching the server's
//!
//! Run with: cargo test -p unique-items-integration-tests -- --ignored

use reqwest::StatusCode;
use serde_json::{Value, json};

use unique_items_integration_tests::{TestContext, unique_suffix};

/// Test helper: Create a published product and return its JSON.
async fn create_test_product(admin: &TestContext, colors: Value) -> Value {
    let suffix = unique_suffix();
    let resp = admin
        .client
        .post(admin.url("/api/admin/products"))
        .json(&json!({
            "name": format!("Cart Test {suffix}"),
            "slug": format!("cart-test-{suffix}"),
            "price": 2500,
            "category": "men",
            "collection": "classic",
            "colors": colors,
        }))
        .send()
        .await
        .expect("Failed to create test product");
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body: Value = resp.json().await.expect("Failed to parse create response");
    body["product"].clone()
}

/// Test helper: Delete a product via the admin API.
async fn delete_test_product(admin: &TestContext, id: &Value) {
    let _ = admin
        .client
        .delete(admin.url(&format!("/api/admin/products/{id}")))
        .send()
        .await;
}

// ============================================================================
// Add & View Tests
// ============================================================================

#[tokio::test]
#[ignore = "Requires running server"]
async fn test_cart_starts_empty() {
    let ctx = TestContext::new();

    let cart = ctx.get_json("/api/cart").await;
    assert_eq!(cart["items"], json!([]));
    assert_eq!(cart["count"], 0);
    assert_eq!(cart["subtotal"], 0);
    assert_eq!(cart["shipping"], 0);
    assert_eq!(cart["total"], 0);
}

#[tokio::test]
#[ignore = "Requires running server and seeded admin credentials"]
async fn test_cart_add_and_totals() {
    let admin = TestContext::admin().await;
    let product = create_test_product(&admin, json!([])).await;

    let ctx = TestContext::new();
    let resp = ctx
        .client
        .post(ctx.url("/api/cart/items"))
        .json(&json!({ "productId": product["id"], "quantity": 2 }))
        .send()
        .await
        .expect("Failed to add to cart");
    assert_eq!(resp.status(), StatusCode::OK);

    let cart: Value = resp.json().await.expect("Failed to parse cart");
    assert_eq!(cart["count"], 2);
    assert_eq!(cart["subtotal"], 5000);
    assert_eq!(cart["shipping"], 200);
    assert_eq!(cart["total"], 5200);

    // The cart persists across requests on the same session cookie.
    let cart = ctx.get_json("/api/cart").await;
    assert_eq!(cart["count"], 2);

    // A different browser has its own cart.
    let other = TestContext::new();
    let cart = other.get_json("/api/cart").await;
    assert_eq!(cart["count"], 0);

    delete_test_product(&admin, &product["id"]).await;
}

#[tokio::test]
#[ignore = "Requires running server and seeded admin credentials"]
async fn test_cart_merges_same_product_and_color() {
    let admin = TestContext::admin().await;
    let product = create_test_product(&admin, json!(["black", "silver"])).await;

    let ctx = TestContext::new();
    for _ in 0..2 {
        let resp = ctx
            .client
            .post(ctx.url("/api/cart/items"))
            .json(&json!({ "productId": product["id"], "color": "Black " }))
            .send()
            .await
            .expect("Failed to add to cart");
        assert_eq!(resp.status(), StatusCode::OK);
    }

    let cart = ctx.get_json("/api/cart").await;
    let items = cart["items"].as_array().expect("items array");
    assert_eq!(items.len(), 1, "Same color should merge into one line");
    let line = items.first().expect("one line");
    assert_eq!(line["qty"], 2);
    assert_eq!(line["color"], "black");

    delete_test_product(&admin, &product["id"]).await;
}

#[tokio::test]
#[ignore = "Requires running server and seeded admin credentials"]
async fn test_cart_color_rules() {
    let admin = TestContext::admin().await;
    let product = create_test_product(&admin, json!(["black", "silver"])).await;

    let ctx = TestContext::new();

    // No color on a multi-color product is a 400.
    let resp = ctx
        .client
        .post(ctx.url("/api/cart/items"))
        .json(&json!({ "productId": product["id"] }))
        .send()
        .await
        .expect("Request failed");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // A color the product does not come in is a 400.
    let resp = ctx
        .client
        .post(ctx.url("/api/cart/items"))
        .json(&json!({ "productId": product["id"], "color": "purple" }))
        .send()
        .await
        .expect("Request failed");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    delete_test_product(&admin, &product["id"]).await;
}

#[tokio::test]
#[ignore = "Requires running server"]
async fn test_cart_unknown_product_is_404() {
    let ctx = TestContext::new();

    let resp = ctx
        .client
        .post(ctx.url("/api/cart/items"))
        .json(&json!({ "productId": 999_999_999 }))
        .send()
        .await
        .expect("Request failed");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// ============================================================================
// Update & Remove Tests
// ============================================================================

#[tokio::test]
#[ignore = "Requires running server and seeded admin credentials"]
async fn test_cart_update_clamps_and_remove_evicts() {
    let admin = TestContext::admin().await;
    let product = create_test_product(&admin, json!([])).await;

    let ctx = TestContext::new();
    let resp = ctx
        .client
        .post(ctx.url("/api/cart/items"))
        .json(&json!({ "productId": product["id"] }))
        .send()
        .await
        .expect("Failed to add to cart");
    assert_eq!(resp.status(), StatusCode::OK);

    // Increment by three.
    let resp = ctx
        .client
        .patch(ctx.url("/api/cart/items"))
        .json(&json!({ "productId": product["id"], "delta": 3 }))
        .send()
        .await
        .expect("Failed to update cart");
    let cart: Value = resp.json().await.expect("Failed to parse cart");
    assert_eq!(cart["count"], 4);

    // Decrementing below one clamps at one; the line stays.
    let resp = ctx
        .client
        .patch(ctx.url("/api/cart/items"))
        .json(&json!({ "productId": product["id"], "delta": -10 }))
        .send()
        .await
        .expect("Failed to update cart");
    let cart: Value = resp.json().await.expect("Failed to parse cart");
    assert_eq!(cart["count"], 1);

    // Remove evicts the line and the shipping fee with it.
    let resp = ctx
        .client
        .delete(ctx.url("/api/cart/items"))
        .json(&json!({ "productId": product["id"] }))
        .send()
        .await
        .expect("Failed to remove from cart");
    let cart: Value = resp.json().await.expect("Failed to parse cart");
    assert_eq!(cart["items"], json!([]));
    assert_eq!(cart["total"], 0);

    delete_test_product(&admin, &product["id"]).await;
}

#[tokio::test]
#[ignore = "Requires running server and seeded admin credentials"]
async fn test_cart_clear() {
    let admin = TestContext::admin().await;
    let product = create_test_product(&admin, json!([])).await;

    let ctx = TestContext::new();
    let resp = ctx
        .client
        .post(ctx.url("/api/cart/items"))
        .json(&json!({ "productId": product["id"], "quantity": 3 }))
        .send()
        .await
        .expect("Failed to add to cart");
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = ctx
        .client
        .delete(ctx.url("/api/cart"))
        .send()
        .await
        .expect("Failed to clear cart");
    let cart: Value = resp.json().await.expect("Failed to parse cart");
    assert_eq!(cart["count"], 0);

    delete_test_product(&admin, &product["id"]).await;
}
