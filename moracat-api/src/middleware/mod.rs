//! Custom tower middleware
//!
//! Session authentication lives in [`crate::app`] as an axum `from_fn`
//! layer; this module holds the plain tower layers.

pub mod security;
