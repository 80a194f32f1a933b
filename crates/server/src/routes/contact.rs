//! Contact form and triage inbox handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use unique_items_core::{ContactMessageId, ContactStatus, Email};

use crate::db::contact_messages::ContactListFilter;
use crate::db::{ContactMessageRepository, RepositoryError};
use crate::error::{AppError, Result};
use crate::models::contact_message::{ContactMessage, NewContactMessage};
use crate::state::AppState;

/// Request from the public contact form.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub whatsapp: String,
    pub subject: String,
    pub message: String,
}

/// Query parameters for the inbox listing.
#[derive(Debug, Default, Deserialize)]
pub struct ContactListQuery {
    pub q: Option<String>,
    pub status: Option<String>,
}

/// Request to move a message to a new triage status.
#[derive(Debug, Deserialize)]
pub struct UpdateContactStatusRequest {
    pub status: Option<String>,
}

/// Response for a stored submission.
#[derive(Debug, Serialize)]
pub struct ContactCreatedResponse {
    pub message: &'static str,
    pub id: ContactMessageId,
}

/// Response for the inbox listing.
#[derive(Debug, Serialize)]
pub struct ContactMessagesResponse {
    pub messages: Vec<ContactMessage>,
}

/// Store a contact form submission.
///
/// # Errors
///
/// Returns 400 when any of the six fields is blank after trimming or the
/// email does not look like an address.
pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<ContactRequest>,
) -> Result<(StatusCode, Json<ContactCreatedResponse>)> {
    let first_name = body.first_name.trim();
    let last_name = body.last_name.trim();
    let email = body.email.trim();
    let whatsapp = body.whatsapp.trim();
    let subject = body.subject.trim();
    let message = body.message.trim();

    if [first_name, last_name, email, whatsapp, subject, message]
        .iter()
        .any(|field| field.is_empty())
    {
        return Err(AppError::Validation("All fields are required.".to_owned()));
    }

    let email = Email::parse(email)
        .map_err(|_| AppError::Validation("Please enter a valid email.".to_owned()))?;

    let stored = ContactMessageRepository::new(state.pool())
        .create(&NewContactMessage {
            first_name: first_name.to_owned(),
            last_name: last_name.to_owned(),
            email,
            whatsapp: whatsapp.to_owned(),
            subject: subject.to_owned(),
            message: message.to_owned(),
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ContactCreatedResponse {
            message: "Message submitted successfully.",
            id: stored.id,
        }),
    ))
}

/// List contact messages, newest first.
///
/// `status` filters exactly unless absent or `all`; `q` is a
/// case-insensitive substring over sender name, email, WhatsApp number, and
/// subject.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ContactListQuery>,
) -> Result<Json<ContactMessagesResponse>> {
    let raw_status = params.status.as_deref().unwrap_or("all").trim();
    let status = if raw_status.is_empty() || raw_status == "all" {
        None
    } else {
        match raw_status.parse::<ContactStatus>() {
            Ok(status) => Some(status),
            // An unknown status can never match a stored row.
            Err(_) => {
                return Ok(Json(ContactMessagesResponse {
                    messages: Vec::new(),
                }));
            }
        }
    };

    let q = params.q.as_deref().map(str::trim).filter(|q| !q.is_empty());

    let messages = ContactMessageRepository::new(state.pool())
        .list(&ContactListFilter { status, q })
        .await?;

    Ok(Json(ContactMessagesResponse { messages }))
}

/// Move a message to `new` or `replied`.
///
/// # Errors
///
/// Returns 400 for a non-numeric id or unknown status and 404 when no
/// message matches.
pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<UpdateContactStatusRequest>,
) -> Result<Json<serde_json::Value>> {
    let id = parse_message_id(&id)?;

    let status = body
        .status
        .as_deref()
        .map(str::trim)
        .and_then(|s| s.parse::<ContactStatus>().ok())
        .ok_or_else(|| AppError::Validation("Invalid status".to_owned()))?;

    ContactMessageRepository::new(state.pool())
        .update_status(id, status)
        .await
        .map_err(|e| match e {
            RepositoryError::NotFound => AppError::NotFound("Message not found".to_owned()),
            other => AppError::Database(other),
        })?;

    Ok(Json(serde_json::json!({ "message": "Updated" })))
}

/// Delete a message.
///
/// # Errors
///
/// Returns 400 for a non-numeric id and 404 when no message matches.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>> {
    let id = parse_message_id(&id)?;

    ContactMessageRepository::new(state.pool())
        .delete(id)
        .await
        .map_err(|e| match e {
            RepositoryError::NotFound => AppError::NotFound("Message not found".to_owned()),
            other => AppError::Database(other),
        })?;

    Ok(Json(serde_json::json!({ "message": "Deleted" })))
}

/// A non-numeric id can never name a message.
fn parse_message_id(raw: &str) -> Result<ContactMessageId> {
    raw.parse::<i32>()
        .map(ContactMessageId::new)
        .map_err(|_| AppError::Validation("Invalid id".to_owned()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_message_id() {
        assert_eq!(parse_message_id("5").unwrap(), ContactMessageId::new(5));
        assert!(parse_message_id("five").is_err());
    }

    #[test]
    fn test_contact_request_defaults_missing_fields() {
        let body: ContactRequest =
            serde_json::from_value(serde_json::json!({ "firstName": "Sana" })).unwrap();
        assert_eq!(body.first_name, "Sana");
        assert!(body.message.is_empty());
    }
}
