//! # MoraCat Shared Library
//!
//! Domain types and business logic for the MoraCat customer portal, used by
//! the API server.
//!
//! ## Module Organization
//!
//! - `pricing`: plans, add-ons and the price calculation
//! - `wizard`: the three-step signup state machine
//! - `models`: users, pets, subscriptions and waitlist entries
//! - `db`: in-memory table storage
//! - `auth`: password hashing, sessions and authorization checks

pub mod auth;
pub mod db;
pub mod models;
pub mod pricing;
pub mod wizard;

/// Current version of the MoraCat shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
