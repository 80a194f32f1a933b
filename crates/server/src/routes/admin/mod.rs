//! Admin console handlers.
//!
//! Login and seed are reachable without a session; every other handler
//! takes the [`RequireAdminAuth`](crate::middleware::RequireAdminAuth)
//! extractor and answers 401 without it.

pub mod auth;
pub mod dashboard;
pub mod products;
pub mod seed;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the admin console router, mounted at `/api/admin`.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/seed", post(seed::seed))
        .route("/products", get(products::list).post(products::create))
        .route(
            "/products/{id}",
            get(products::show)
                .patch(products::update)
                .delete(products::delete),
        )
        .route("/dashboard", get(dashboard::show))
}
