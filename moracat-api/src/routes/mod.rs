//! API route handlers, one module per resource
//!
//! - `health`: liveness and store counts
//! - `auth`: register, login, logout, current user
//! - `pets`: pet profiles of the session user
//! - `subscriptions`: subscriptions of the session user
//! - `pricing`: price list and quotes
//! - `waitlist`: public launch waitlist
//! - `upload`: logo upload
//! - `admin`: admin-only listings

pub mod admin;
pub mod auth;
pub mod health;
pub mod pets;
pub mod pricing;
pub mod subscriptions;
pub mod upload;
pub mod waitlist;
