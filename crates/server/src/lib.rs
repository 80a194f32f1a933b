//! Unique Items server library.
//!
//! This crate provides the storefront and admin API functionality as a
//! library, allowing it to be tested and reused (the CLI drives migrations
//! and account management through it).

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;

/// Embedded schema migrations, applied at deploy time via
/// `unique-items migrate run`.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!();
