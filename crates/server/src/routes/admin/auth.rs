//! Admin login and logout handlers.

use axum::{Json, extract::State};
use serde::Deserialize;
use tower_sessions::Session;

use crate::error::{AppError, Result, clear_sentry_user, set_sentry_user};
use crate::middleware::{RequireAdminAuth, clear_current_admin, set_current_admin};
use crate::models::session::CurrentAdmin;
use crate::services::auth::AuthService;
use crate::state::AppState;

/// Login request payload.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Log an admin in with email and password.
///
/// The session id is rotated on success so the authenticated session never
/// shares an id with the anonymous one that preceded it.
///
/// # Errors
///
/// Returns 400 when either field is blank and 401 when the credentials do
/// not match an account.
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(body): Json<LoginRequest>,
) -> Result<Json<serde_json::Value>> {
    if body.email.trim().is_empty() || body.password.is_empty() {
        return Err(AppError::Validation(
            "Email and password are required.".to_owned(),
        ));
    }

    let admin = AuthService::new(state.pool())
        .login(&body.email, &body.password)
        .await?;

    session
        .cycle_id()
        .await
        .map_err(|e| AppError::Internal(format!("session error: {e}")))?;

    let current = CurrentAdmin {
        id: admin.id,
        email: admin.email,
    };
    set_current_admin(&session, &current)
        .await
        .map_err(|e| AppError::Internal(format!("session error: {e}")))?;

    set_sentry_user(&current.id, Some(current.email.as_str()));
    tracing::info!(admin_id = %current.id, "Admin logged in");

    Ok(Json(serde_json::json!({
        "message": "Login success",
        "admin": current,
    })))
}

/// Log the current admin out.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn logout(
    RequireAdminAuth(admin): RequireAdminAuth,
    session: Session,
) -> Result<Json<serde_json::Value>> {
    clear_current_admin(&session)
        .await
        .map_err(|e| AppError::Internal(format!("session error: {e}")))?;

    clear_sentry_user();
    tracing::info!(admin_id = %admin.id, "Admin logged out");

    Ok(Json(serde_json::json!({ "message": "Logged out" })))
}
