//! Domain models for the server.
//!
//! These are the validated shapes the repositories return and the routes
//! serialize. Request payloads live beside their route handlers.

pub mod admin;
pub mod checkout_draft;
pub mod contact_message;
pub mod order;
pub mod product;
pub mod session;

pub use session::keys as session_keys;
