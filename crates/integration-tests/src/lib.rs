//! Integration tests for Unique Items.
//!
//! # Running Tests
//!
//! ```bash
//! # Apply migrations, then start the server
//! cargo run -p unique-items-cli -- migrate run
//! cargo run -p unique-items-server
//!
//! # Run the ignored end-to-end tests against it
//! cargo test -p unique-items-integration-tests -- --ignored
//! ```
//!
//! # Environment Variables
//!
//! - `UNIQUE_ITEMS_BASE_URL` - Server under test (default: `http://localhost:3000`)
//! - `ADMIN_SEED_SECRET` / `ADMIN_EMAIL` / `ADMIN_PASSWORD` - Must match the
//!   server's environment; admin tests bootstrap and log in with these
//!
//! # Test Categories
//!
//! - `storefront_*` - Catalog, cart, and checkout flows
//! - `admin_*` - Console auth, product management, orders, and triage

use reqwest::{Client, StatusCode};
use serde_json::{Value, json};

/// A cookie-holding HTTP client pointed at the server under test.
///
/// Each context is its own browser: a fresh cookie jar, and therefore a
/// fresh session cart.
pub struct TestContext {
    pub client: Client,
    pub base_url: String,
}

impl TestContext {
    /// Create an anonymous context (no session yet).
    #[must_use]
    pub fn new() -> Self {
        let base_url = std::env::var("UNIQUE_ITEMS_BASE_URL")
            .unwrap_or_else(|_| "http://localhost:3000".to_string());
        let client = Client::builder()
            .cookie_store(true)
            .build()
            .expect("Failed to create HTTP client");

        Self { client, base_url }
    }

    /// Create a context logged in as the seeded admin.
    ///
    /// Bootstraps the admin account via the seed endpoint (a no-op when it
    /// already exists), then logs in. Panics if the seed secret or
    /// credentials do not match the server's environment.
    pub async fn admin() -> Self {
        let ctx = Self::new();

        let secret = std::env::var("ADMIN_SEED_SECRET").expect("ADMIN_SEED_SECRET not set");
        let email = std::env::var("ADMIN_EMAIL").expect("ADMIN_EMAIL not set");
        let password = std::env::var("ADMIN_PASSWORD").expect("ADMIN_PASSWORD not set");

        let resp = ctx
            .client
            .post(ctx.url("/api/admin/seed"))
            .json(&json!({ "secret": secret }))
            .send()
            .await
            .expect("Failed to seed admin");
        assert!(
            resp.status() == StatusCode::OK || resp.status() == StatusCode::CREATED,
            "Seed failed: {}",
            resp.status()
        );

        let resp = ctx
            .client
            .post(ctx.url("/api/admin/login"))
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .expect("Failed to log in");
        assert_eq!(resp.status(), StatusCode::OK, "Login failed");

        ctx
    }

    /// Build a full URL for an API path.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// GET a path and parse the JSON body, asserting 200.
    pub async fn get_json(&self, path: &str) -> Value {
        let resp = self
            .client
            .get(self.url(path))
            .send()
            .await
            .expect("Request failed");
        assert_eq!(resp.status(), StatusCode::OK, "GET {path} failed");
        resp.json().await.expect("Failed to parse response body")
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

/// A unique suffix for slugs and emails, so reruns never collide.
#[must_use]
pub fn unique_suffix() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}
