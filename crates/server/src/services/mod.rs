//! Business logic services.
//!
//! # Services
//!
//! - `auth` - Admin authentication (password login, account creation)
//! - `blob` - Payment-proof storage behind a Vercel-Blob-compatible API
//! - `cart_store` - Session-backed cart persistence

pub mod auth;
pub mod blob;
pub mod cart_store;
