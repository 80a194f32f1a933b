//! Cart persistence between requests.
//!
//! Cart contents live server-side, keyed by the visitor's session cookie.
//! The [`CartStore`] trait is the seam between cart handlers and the backing
//! storage, so cart flows can be driven in tests without a session layer.

use std::future::Future;

use thiserror::Error;
use tower_sessions::Session;

use unique_items_core::cart::Cart;

use crate::models::session_keys;

/// Errors that can occur persisting a cart.
#[derive(Debug, Error)]
pub enum CartStoreError {
    /// Session-backed storage failed.
    #[error("session error: {0}")]
    Session(#[from] tower_sessions::session::Error),
}

/// Capability for loading and saving a visitor's cart.
pub trait CartStore {
    /// Load the cart, or an empty one if nothing usable is stored.
    fn load(&self) -> impl Future<Output = Cart> + Send;

    /// Persist the cart.
    fn save(&self, cart: &Cart) -> impl Future<Output = Result<(), CartStoreError>> + Send;
}

/// Cart storage backed by the visitor's `tower-sessions` session.
#[derive(Debug, Clone)]
pub struct SessionCartStore {
    session: Session,
}

impl SessionCartStore {
    /// Create a store bound to one request's session.
    #[must_use]
    pub const fn new(session: Session) -> Self {
        Self { session }
    }
}

impl CartStore for SessionCartStore {
    async fn load(&self) -> Cart {
        // A cart that fails to decode is junk; start fresh.
        match self.session.get::<Cart>(session_keys::CART).await {
            Ok(Some(cart)) => cart,
            Ok(None) | Err(_) => Cart::default(),
        }
    }

    async fn save(&self, cart: &Cart) -> Result<(), CartStoreError> {
        self.session.insert(session_keys::CART, cart).await?;
        Ok(())
    }
}

/// In-memory cart storage for tests.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemoryCartStore {
    cart: std::sync::Mutex<Cart>,
}

#[cfg(test)]
impl CartStore for MemoryCartStore {
    async fn load(&self) -> Cart {
        self.cart.lock().map(|c| c.clone()).unwrap_or_default()
    }

    async fn save(&self, cart: &Cart) -> Result<(), CartStoreError> {
        if let Ok(mut stored) = self.cart.lock() {
            *stored = cart.clone();
        }
        Ok(())
    }
}
