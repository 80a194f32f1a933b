//! Unique Items Core - Shared domain library.
//!
//! This crate provides the types and pure logic used across all Unique Items
//! components:
//! - `server` - Storefront + admin HTTP API
//! - `cli` - Command-line tools for migrations and management
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no database
//! access, no HTTP clients. This keeps it lightweight and allows it to be used
//! anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, rupee amounts, emails, and statuses
//! - [`cart`] - The shopper's cart: lines keyed by (product, color), quantity rules
//! - [`checkout`] - Totals computation and shipping-form validation
//! - [`upload`] - Payment-proof image naming and content-type rules

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod checkout;
pub mod types;
pub mod upload;

pub use types::*;
