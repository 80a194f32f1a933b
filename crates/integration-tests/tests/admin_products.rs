//! Integration tests for the admin console: auth lifecycle, product
//! management, and the dashboard.
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

/// Test helper: Create a product via the admin API, returning its JSON.
async fn create_test_product(admin: &TestContext, body: Value) -> Value {
    let resp = admin
        .client
        .post(admin.url("/api/admin/products"))
        .json(&body)
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
// Auth Tests
// ============================================================================

#[tokio::test]
#[ignore = "Requires running server"]
async fn test_admin_routes_require_session() {
    let ctx = TestContext::new();

    let guarded = [
        ctx.client.get(ctx.url("/api/admin/products")),
        ctx.client.post(ctx.url("/api/admin/products")).json(&json!({})),
        ctx.client.get(ctx.url("/api/admin/dashboard")),
        ctx.client.post(ctx.url("/api/admin/logout")),
    ];
    for request in guarded {
        let resp = request.send().await.expect("Request failed");
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }
}

#[tokio::test]
#[ignore = "Requires running server"]
async fn test_admin_login_rejects_bad_input() {
    let ctx = TestContext::new();

    // Blank credentials are a 400.
    let resp = ctx
        .client
        .post(ctx.url("/api/admin/login"))
        .json(&json!({ "email": "", "password": "" }))
        .send()
        .await
        .expect("Request failed");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.expect("Failed to parse response");
    assert_eq!(body["message"], "Email and password are required.");

    // Wrong credentials are a 401 with the same message either way.
    let resp = ctx
        .client
        .post(ctx.url("/api/admin/login"))
        .json(&json!({ "email": "nobody@example.com", "password": "wrong-password" }))
        .send()
        .await
        .expect("Request failed");
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = resp.json().await.expect("Failed to parse response");
    assert_eq!(body["message"], "Invalid admin credentials.");
}

#[tokio::test]
#[ignore = "Requires running server"]
async fn test_admin_seed_rejects_wrong_secret() {
    let ctx = TestContext::new();

    let resp = ctx
        .client
        .post(ctx.url("/api/admin/seed"))
        .json(&json!({ "secret": "definitely-wrong" }))
        .send()
        .await
        .expect("Request failed");
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "Requires running server and seeded admin credentials"]
async fn test_admin_login_logout_lifecycle() {
    let ctx = TestContext::admin().await;

    // The session works.
    let resp = ctx
        .client
        .get(ctx.url("/api/admin/dashboard"))
        .send()
        .await
        .expect("Request failed");
    assert_eq!(resp.status(), StatusCode::OK);

    // Logout clears it.
    let resp = ctx
        .client
        .post(ctx.url("/api/admin/logout"))
        .send()
        .await
        .expect("Failed to log out");
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("Failed to parse response");
    assert_eq!(body["message"], "Logged out");

    let resp = ctx
        .client
        .get(ctx.url("/api/admin/dashboard"))
        .send()
        .await
        .expect("Request failed");
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

// ============================================================================
// Product CRUD Tests
// ============================================================================

#[tokio::test]
#[ignore = "Requires running server and seeded admin credentials"]
async fn test_product_create_applies_defaults() {
    let admin = TestContext::admin().await;
    let suffix = unique_suffix();

    let product = create_test_product(
        &admin,
        json!({
            "name": format!("Defaults {suffix}"),
            "slug": format!("Defaults-{suffix}"),
            "price": 0,
            "category": "sport",
            "collection": "sport",
        }),
    )
    .await;

    // The slug is stored lower-cased; a zero price is allowed.
    assert_eq!(product["slug"], format!("defaults-{suffix}"));
    assert_eq!(product["price"], 0);
    assert_eq!(product["oldPrice"], Value::Null);
    assert_eq!(product["description"], "");
    assert_eq!(product["status"], "published");
    assert_eq!(product["inStock"], true);

    delete_test_product(&admin, &product["id"]).await;
}

#[tokio::test]
#[ignore = "Requires running server and seeded admin credentials"]
async fn test_product_create_rejects_missing_fields() {
    let admin = TestContext::admin().await;

    let cases = [
        json!({ "slug": "x", "price": 100, "category": "men", "collection": "classic" }),
        json!({ "name": "X", "price": 100, "category": "men", "collection": "classic" }),
        json!({ "name": "X", "slug": "x", "category": "men", "collection": "classic" }),
        json!({ "name": "X", "slug": "x", "price": 100, "collection": "classic" }),
        json!({ "name": "X", "slug": "x", "price": 100, "category": "men" }),
    ];
    for payload in cases {
        let resp = admin
            .client
            .post(admin.url("/api/admin/products"))
            .json(&payload)
            .send()
            .await
            .expect("Request failed");
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "payload: {payload}");
        let body: Value = resp.json().await.expect("Failed to parse response");
        assert_eq!(body["message"], "Missing required fields");
    }
}

#[tokio::test]
#[ignore = "Requires running server and seeded admin credentials"]
async fn test_product_create_rejects_duplicate_slug() {
    let admin = TestContext::admin().await;
    let suffix = unique_suffix();

    let payload = json!({
        "name": format!("Dup {suffix}"),
        "slug": format!("dup-{suffix}"),
        "price": 1500,
        "category": "men",
        "collection": "classic",
    });
    let product = create_test_product(&admin, payload.clone()).await;

    let resp = admin
        .client
        .post(admin.url("/api/admin/products"))
        .json(&payload)
        .send()
        .await
        .expect("Request failed");
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body: Value = resp.json().await.expect("Failed to parse response");
    assert_eq!(body["message"], "Slug already exists");

    delete_test_product(&admin, &product["id"]).await;
}

#[tokio::test]
#[ignore = "Requires running server and seeded admin credentials"]
async fn test_product_update_and_delete() {
    let admin = TestContext::admin().await;
    let suffix = unique_suffix();

    let product = create_test_product(
        &admin,
        json!({
            "name": format!("Update {suffix}"),
            "slug": format!("update-{suffix}"),
            "price": 2000,
            "oldPrice": 2400,
            "category": "women",
            "collection": "minimal",
        }),
    )
    .await;
    let id = product["id"].clone();

    // An empty patch is refused.
    let resp = admin
        .client
        .patch(admin.url(&format!("/api/admin/products/{id}")))
        .json(&json!({}))
        .send()
        .await
        .expect("Request failed");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.expect("Failed to parse response");
    assert_eq!(body["message"], "No fields to update");

    // Patch price, clear the compare-at price, unpublish.
    let resp = admin
        .client
        .patch(admin.url(&format!("/api/admin/products/{id}")))
        .json(&json!({ "price": 1800, "oldPrice": null, "status": "draft", "inStock": false }))
        .send()
        .await
        .expect("Failed to update product");
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("Failed to parse response");
    assert_eq!(body["message"], "Product updated successfully");
    assert_eq!(body["product"]["price"], 1800);
    assert_eq!(body["product"]["oldPrice"], Value::Null);
    assert_eq!(body["product"]["status"], "draft");
    assert_eq!(body["product"]["inStock"], false);

    // Delete, then confirm it is gone.
    let resp = admin
        .client
        .delete(admin.url(&format!("/api/admin/products/{id}")))
        .send()
        .await
        .expect("Failed to delete product");
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = admin
        .client
        .delete(admin.url(&format!("/api/admin/products/{id}")))
        .send()
        .await
        .expect("Request failed");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = resp.json().await.expect("Failed to parse response");
    assert_eq!(body["message"], "Product not found");
}

// ============================================================================
// Listing & Lookup Tests
// ============================================================================

#[tokio::test]
#[ignore = "Requires running server and seeded admin credentials"]
async fn test_product_listing_filters() {
    let admin = TestContext::admin().await;
    let suffix = unique_suffix();

    let draft = create_test_product(
        &admin,
        json!({
            "name": format!("Filter Draft {suffix}"),
            "slug": format!("filter-draft-{suffix}"),
            "price": 900,
            "category": "kids",
            "collection": "minimal",
            "status": "draft",
        }),
    )
    .await;

    let slug = format!("filter-draft-{suffix}");
    let contains_slug = |body: &Value| {
        body["products"]
            .as_array()
            .expect("products array")
            .iter()
            .any(|p| p["slug"] == slug.as_str())
    };

    // The draft shows with no filter and with status=draft.
    let body = admin.get_json("/api/admin/products").await;
    assert!(contains_slug(&body));
    let body = admin.get_json("/api/admin/products?status=draft").await;
    assert!(contains_slug(&body));

    // status=published hides it.
    let body = admin.get_json("/api/admin/products?status=published").await;
    assert!(!contains_slug(&body));

    // An unrecognized status does not filter at all.
    let body = admin.get_json("/api/admin/products?status=everything").await;
    assert!(contains_slug(&body));

    // Substring search over the slug.
    let body = admin
        .get_json(&format!("/api/admin/products?q=filter-draft-{suffix}"))
        .await;
    assert!(contains_slug(&body));

    delete_test_product(&admin, &draft["id"]).await;
}

#[tokio::test]
#[ignore = "Requires running server and seeded admin credentials"]
async fn test_product_lookup_by_slug_and_id() {
    let admin = TestContext::admin().await;
    let suffix = unique_suffix();

    let product = create_test_product(
        &admin,
        json!({
            "name": format!("Lookup {suffix}"),
            "slug": format!("lookup-{suffix}"),
            "price": 3000,
            "category": "men",
            "collection": "luxury",
            "status": "draft",
        }),
    )
    .await;
    let id = product["id"].clone();

    // Lookup params return the single product, draft or not.
    let body = admin
        .get_json(&format!("/api/admin/products?slug=lookup-{suffix}"))
        .await;
    assert_eq!(body["product"]["id"], id);

    let body = admin.get_json(&format!("/api/admin/products?id={id}")).await;
    assert_eq!(body["product"]["slug"], format!("lookup-{suffix}"));

    // And so does the path form.
    let body = admin.get_json(&format!("/api/admin/products/{id}")).await;
    assert_eq!(body["product"]["status"], "draft");

    // Unknown lookups are 404s.
    let resp = admin
        .client
        .get(admin.url("/api/admin/products?slug=no-such-slug-ever"))
        .send()
        .await
        .expect("Request failed");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    delete_test_product(&admin, &id).await;
}

// ============================================================================
// Dashboard Tests
// ============================================================================

#[tokio::test]
#[ignore = "Requires running server and seeded admin credentials"]
async fn test_dashboard_shape() {
    let admin = TestContext::admin().await;

    let body = admin.get_json("/api/admin/dashboard").await;
    let data = &body["data"];

    assert!(data["totalOrders"].is_number());
    assert!(data["totalProducts"].is_number());
    assert_eq!(data["totalCustomers"], 0);
    assert!(data["revenue"].is_number());
    assert!(data["productsOutOfStock"].is_number());
    assert!(data["pendingOrders"].is_number());
    assert!(data["dispatchedToday"].is_number());

    let recent = data["recentOrders"].as_array().expect("recentOrders array");
    assert!(recent.len() <= 6);
    for order in recent {
        assert!(order["form"].is_object());
        assert!(order["total"].is_number());
        assert!(order["status"].is_string());
        assert!(order["createdAt"].is_string());
    }
}
