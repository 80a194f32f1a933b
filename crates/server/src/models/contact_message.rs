//! Contact message domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use unique_items_core::{ContactMessageId, ContactStatus, Email};

/// A message submitted through the public contact form (domain type).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessage {
    /// Unique message ID.
    pub id: ContactMessageId,
    /// Sender's first name.
    pub first_name: String,
    /// Sender's last name.
    pub last_name: String,
    /// Sender's email address.
    pub email: Email,
    /// Sender's WhatsApp number.
    pub whatsapp: String,
    /// Subject line.
    pub subject: String,
    /// Message body.
    pub message: String,
    /// Triage status.
    pub status: ContactStatus,
    /// When the message was submitted.
    pub created_at: DateTime<Utc>,
    /// When the message was last touched by an admin.
    pub updated_at: DateTime<Utc>,
}

/// Validated input for recording a contact form submission.
#[derive(Debug, Clone)]
pub struct NewContactMessage {
    pub first_name: String,
    pub last_name: String,
    pub email: Email,
    pub whatsapp: String,
    pub subject: String,
    pub message: String,
}
