//! Authentication and authorization
//!
//! # Modules
//!
//! - [`password`]: Argon2id password hashing
//! - [`session`]: signed session tokens, revocation and session cookies
//! - [`context`]: the authenticated caller, attached to each request
//! - [`authorization`]: ownership and admin checks

pub mod authorization;
pub mod context;
pub mod password;
pub mod session;
