//! Integration tests for checkout drafts, finalization, and order capture.
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

/// Test helper: Create a published product via the admin API.
async fn create_test_product(admin: &TestContext) -> Value {
    let suffix = unique_suffix();
    let resp = admin
        .client
        .post(admin.url("/api/admin/products"))
        .json(&json!({
            "name": format!("Checkout Test {suffix}"),
            "slug": format!("checkout-test-{suffix}"),
            "price": 2500,
            "category": "men",
            "collection": "classic",
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

/// Test helper: Add a product to the context's session cart.
async fn add_to_cart(ctx: &TestContext, product_id: &Value, quantity: u32) {
    let resp = ctx
        .client
        .post(ctx.url("/api/cart/items"))
        .json(&json!({ "productId": product_id, "quantity": quantity }))
        .send()
        .await
        .expect("Failed to add to cart");
    assert_eq!(resp.status(), StatusCode::OK);
}

/// A complete, valid shipping form.
fn shipping_form() -> Value {
    json!({
        "firstName": "Ayesha",
        "lastName": "Khan",
        "phone": "03001234567",
        "email": "ayesha@example.com",
        "address": "House 12, Street 4",
        "city": "Lahore",
        "postal": "54000",
        "paymentMethod": "online",
    })
}

/// Test helper: Stage the context's cart as a draft, returning the draft.
async fn create_draft(ctx: &TestContext) -> Value {
    let resp = ctx
        .client
        .post(ctx.url("/api/checkout/drafts"))
        .json(&json!({ "form": shipping_form() }))
        .send()
        .await
        .expect("Failed to create draft");
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body: Value = resp.json().await.expect("Failed to parse draft response");
    body["data"].clone()
}

// ============================================================================
// Draft Staging Tests
// ============================================================================

#[tokio::test]
#[ignore = "Requires running server"]
async fn test_draft_rejects_empty_cart() {
    let ctx = TestContext::new();

    let resp = ctx
        .client
        .post(ctx.url("/api/checkout/drafts"))
        .json(&json!({ "form": shipping_form() }))
        .send()
        .await
        .expect("Request failed");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "Requires running server and seeded admin credentials"]
async fn test_draft_rejects_blank_required_field() {
    let admin = TestContext::admin().await;
    let product = create_test_product(&admin).await;

    let ctx = TestContext::new();
    add_to_cart(&ctx, &product["id"], 1).await;

    let mut form = shipping_form();
    form["city"] = json!("   ");
    let resp = ctx
        .client
        .post(ctx.url("/api/checkout/drafts"))
        .json(&json!({ "form": form }))
        .send()
        .await
        .expect("Request failed");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    delete_test_product(&admin, &product["id"]).await;
}

#[tokio::test]
#[ignore = "Requires running server and seeded admin credentials"]
async fn test_draft_freezes_cart_and_totals() {
    let admin = TestContext::admin().await;
    let product = create_test_product(&admin).await;

    let ctx = TestContext::new();
    add_to_cart(&ctx, &product["id"], 2).await;

    let draft = create_draft(&ctx).await;
    assert!(draft["draftId"].is_string());
    assert_eq!(draft["subtotal"], 5000);
    assert_eq!(draft["shipping"], 200);
    assert_eq!(draft["total"], 5200);
    assert_eq!(draft["form"]["city"], "Lahore");

    // The draft is readable until it expires, with transfer instructions.
    let draft_id = draft["draftId"].as_str().expect("draft id");
    let body = ctx
        .get_json(&format!("/api/checkout/drafts/{draft_id}"))
        .await;
    assert_eq!(body["data"]["total"], 5200);
    assert_eq!(body["payment"]["advanceAmount"], 250);

    delete_test_product(&admin, &product["id"]).await;
}

#[tokio::test]
#[ignore = "Requires running server"]
async fn test_draft_unknown_id_is_404() {
    let ctx = TestContext::new();

    // A well-formed but unknown id, and garbage that cannot even parse.
    for id in [uuid::Uuid::new_v4().to_string(), "not-a-uuid".to_string()] {
        let resp = ctx
            .client
            .get(ctx.url(&format!("/api/checkout/drafts/{id}")))
            .send()
            .await
            .expect("Request failed");
        assert_eq!(resp.status(), StatusCode::NOT_FOUND, "id: {id}");
    }
}

// ============================================================================
// Finalization Tests
// ============================================================================

#[tokio::test]
#[ignore = "Requires running server and seeded admin credentials"]
async fn test_finalize_is_idempotent() {
    let admin = TestContext::admin().await;
    let product = create_test_product(&admin).await;

    let ctx = TestContext::new();
    add_to_cart(&ctx, &product["id"], 1).await;
    let draft = create_draft(&ctx).await;
    let draft_id = draft["draftId"].as_str().expect("draft id").to_owned();

    let payload = json!({ "paymentProofUrl": "https://blob.example.com/proof.jpg" });

    let resp = ctx
        .client
        .post(ctx.url(&format!("/api/checkout/drafts/{draft_id}/finalize")))
        .json(&payload)
        .send()
        .await
        .expect("Failed to finalize draft");
    assert_eq!(resp.status(), StatusCode::CREATED);
    let first: Value = resp.json().await.expect("Failed to parse response");
    let order_id = first["orderId"].clone();

    // A replay answers 200 with the same order, not a duplicate.
    let resp = ctx
        .client
        .post(ctx.url(&format!("/api/checkout/drafts/{draft_id}/finalize")))
        .json(&payload)
        .send()
        .await
        .expect("Failed to replay finalize");
    assert_eq!(resp.status(), StatusCode::OK);
    let second: Value = resp.json().await.expect("Failed to parse response");
    assert_eq!(second["orderId"], order_id);

    // The order carries the draft's frozen totals and starts unverified.
    let body = ctx.get_json(&format!("/api/orders/{order_id}")).await;
    assert_eq!(body["order"]["total"], 2700);
    assert_eq!(body["order"]["status"], "pending_verification");
    assert_eq!(body["order"]["draftId"], draft["draftId"]);

    // Finalization empties the session cart.
    let cart = ctx.get_json("/api/cart").await;
    assert_eq!(cart["count"], 0);

    delete_test_product(&admin, &product["id"]).await;
}

#[tokio::test]
#[ignore = "Requires running server and seeded admin credentials"]
async fn test_finalize_requires_payment_proof() {
    let admin = TestContext::admin().await;
    let product = create_test_product(&admin).await;

    let ctx = TestContext::new();
    add_to_cart(&ctx, &product["id"], 1).await;
    let draft = create_draft(&ctx).await;
    let draft_id = draft["draftId"].as_str().expect("draft id");

    let resp = ctx
        .client
        .post(ctx.url(&format!("/api/checkout/drafts/{draft_id}/finalize")))
        .json(&json!({ "paymentProofUrl": "   " }))
        .send()
        .await
        .expect("Request failed");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    delete_test_product(&admin, &product["id"]).await;
}

#[tokio::test]
#[ignore = "Requires running server"]
async fn test_finalize_unknown_draft_is_404() {
    let ctx = TestContext::new();

    let resp = ctx
        .client
        .post(ctx.url(&format!(
            "/api/checkout/drafts/{}/finalize",
            uuid::Uuid::new_v4()
        )))
        .json(&json!({ "paymentProofUrl": "https://blob.example.com/proof.jpg" }))
        .send()
        .await
        .expect("Request failed");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// ============================================================================
// Payment Proof Upload Tests
// ============================================================================

#[tokio::test]
#[ignore = "Requires running server"]
async fn test_upload_rejects_unsupported_type() {
    let ctx = TestContext::new();

    let part = reqwest::multipart::Part::bytes(b"not an image".to_vec())
        .file_name("proof.txt")
        .mime_str("text/plain")
        .expect("valid mime");
    let form = reqwest::multipart::Form::new().part("file", part);

    let resp = ctx
        .client
        .post(ctx.url("/api/upload"))
        .multipart(form)
        .send()
        .await
        .expect("Request failed");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "Requires running server"]
async fn test_upload_rejects_missing_file() {
    let ctx = TestContext::new();

    let form = reqwest::multipart::Form::new().text("note", "no file here");

    let resp = ctx
        .client
        .post(ctx.url("/api/upload"))
        .multipart(form)
        .send()
        .await
        .expect("Request failed");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "Requires running server with blob storage configured"]
async fn test_upload_stores_jpeg() {
    let ctx = TestContext::new();

    // A minimal JPEG header is enough; the server checks type, not content.
    let part = reqwest::multipart::Part::bytes(vec![0xFF, 0xD8, 0xFF, 0xE0])
        .file_name("proof.jpg")
        .mime_str("image/jpeg")
        .expect("valid mime");
    let form = reqwest::multipart::Form::new().part("file", part);

    let resp = ctx
        .client
        .post(ctx.url("/api/upload"))
        .multipart(form)
        .send()
        .await
        .expect("Request failed");
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = resp.json().await.expect("Failed to parse response");
    let url = body["url"].as_str().expect("url string");
    assert!(url.contains("payment-proof-"));
    assert!(url.ends_with(".jpg"));
}

// ============================================================================
// Direct Order Capture Tests
// ============================================================================

#[tokio::test]
#[ignore = "Requires running server"]
async fn test_order_create_validation() {
    let ctx = TestContext::new();

    let items = json!([{ "id": 1, "name": "Watch", "price": 2500, "qty": 1 }]);
    let cases = [
        // No form.
        json!({ "items": items, "paymentProofUrl": "https://x/p.jpg" }),
        // No items.
        json!({ "form": shipping_form(), "paymentProofUrl": "https://x/p.jpg" }),
        // No payment proof.
        json!({ "form": shipping_form(), "items": items }),
    ];
    for payload in cases {
        let resp = ctx
            .client
            .post(ctx.url("/api/orders"))
            .json(&payload)
            .send()
            .await
            .expect("Request failed");
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "payload: {payload}");
    }
}

#[tokio::test]
#[ignore = "Requires running server"]
async fn test_order_create_echoes_client_snapshot() {
    let ctx = TestContext::new();

    let resp = ctx
        .client
        .post(ctx.url("/api/orders"))
        .json(&json!({
            "form": shipping_form(),
            "items": [
                { "id": 1, "name": "Watch", "price": 2500, "qty": 2 },
                { "id": 2, "name": "Strap", "price": 500, "qty": 0 },
            ],
            "subtotal": 5500,
            "shipping": 200,
            "total": 5700,
            "paymentProofUrl": "https://blob.example.com/proof.jpg",
            "receiver": { "name": "Unique Items", "easypaisaMsisdn": "03451234567" },
        }))
        .send()
        .await
        .expect("Failed to create order");
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body: Value = resp.json().await.expect("Failed to parse response");
    let order_id = body["orderId"].clone();

    let body = ctx.get_json(&format!("/api/orders/{order_id}")).await;
    let order = &body["order"];
    assert_eq!(order["total"], 5700);
    assert_eq!(order["status"], "pending_verification");
    assert_eq!(order["receiver"]["easypaisaMsisdn"], "03451234567");
    // A zero quantity is stored as one; the rest of the snapshot is verbatim.
    let items = order["items"].as_array().expect("items array");
    assert_eq!(items.first().expect("first line")["qty"], 2);
    assert_eq!(items.last().expect("second line")["qty"], 1);
}
