//! Secret-gated admin bootstrap endpoint.
//!
//! Creates the configured admin account on a fresh deployment. The request
//! must present the shared seed secret; the account credentials come from
//! the server configuration, never from the request body.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use secrecy::ExposeSecret;
use serde::Deserialize;

use crate::error::{AppError, Result};
use crate::services::auth::AuthService;
use crate::state::AppState;

/// Seed request payload.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SeedRequest {
    pub secret: String,
}

/// Create the configured admin account if it does not exist yet.
///
/// # Errors
///
/// Returns 500 when the seed secret or admin credentials are not
/// configured and 401 when the presented secret does not match.
pub async fn seed(
    State(state): State<AppState>,
    Json(body): Json<SeedRequest>,
) -> Result<Response> {
    let seed = &state.config().admin_seed;

    let Some(expected) = seed.secret.as_ref() else {
        return Ok(misconfigured("ADMIN_SEED_SECRET is not set"));
    };

    if body.secret != expected.expose_secret() {
        return Err(AppError::Unauthorized("Unauthorized".to_owned()));
    }

    let (Some(email), Some(password)) = (seed.email.as_deref(), seed.password.as_ref()) else {
        return Ok(misconfigured("ADMIN_EMAIL / ADMIN_PASSWORD not set"));
    };

    let auth = AuthService::new(state.pool());

    if auth.admin_exists(email).await? {
        return Ok(Json(serde_json::json!({ "message": "Admin already exists" })).into_response());
    }

    let admin = auth.create_admin(email, password.expose_secret()).await?;
    tracing::info!(admin_id = %admin.id, "Seeded admin account");

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({ "message": "Admin created" })),
    )
        .into_response())
}

/// A 500 whose body names the missing variable, unlike the opaque
/// [`AppError::Internal`] body.
fn misconfigured(message: &str) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(serde_json::json!({ "message": message })),
    )
        .into_response()
}
