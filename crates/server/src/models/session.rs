//! Session-related types.
//!
//! Types stored in the session: the authenticated admin identity and the
//! shopper's cart.

use serde::{Deserialize, Serialize};

use unique_items_core::{AdminId, Email};

/// Session-stored admin identity.
///
/// Minimal data stored in the session to identify the logged-in admin.
/// Also the wire shape of the login response's `admin` field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentAdmin {
    /// Admin's database ID.
    pub id: AdminId,
    /// Admin's email address.
    pub email: Email,
}

/// Session keys for authentication and cart data.
pub mod keys {
    /// Key for storing the current logged-in admin.
    pub const CURRENT_ADMIN: &str = "current_admin";

    /// Key for storing the shopper's cart.
    pub const CART: &str = "cart";
}
