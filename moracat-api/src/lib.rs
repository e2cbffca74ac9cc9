//! # MoraCat API Server Library
//!
//! JSON API behind the MoraCat pet-food subscription portal.
//!
//! ## Modules
//!
//! - `app`: Application state, router and session layer
//! - `config`: Configuration from the environment
//! - `error`: Error handling and HTTP response mapping
//! - `extract`: Validated JSON bodies and path ids
//! - `middleware`: Security headers
//! - `routes`: Route handlers
//! - `storage`: Logo storage

pub mod app;
pub mod config;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod routes;
pub mod storage;
