//! Storage layer for MoraCat
//!
//! Records live in process memory and are lost on restart. Every model in
//! [`crate::models`] reads and writes through a [`store::MemStore`] handle,
//! so moving to a persistent backend only touches this module.
//!
//! # Modules
//!
//! - `store`: map-backed tables with auto-increment ids
//!
//! # Example
//!
//! ```
//! use moracat_shared::db::store::MemStore;
//!
//! let store = MemStore::new();
//! assert_eq!(store.stats().unwrap().users, 0);
//! ```

pub mod store;
