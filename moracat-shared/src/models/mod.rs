//! Data models for MoraCat
//!
//! Each model owns its store operations, called with a [`MemStore`] handle.
//!
//! # Models
//!
//! - `user`: customer and admin accounts
//! - `pet`: pet profiles, owned by one user
//! - `subscription`: plan + add-ons for one pet, with a frozen price
//! - `waitlist`: pre-launch signups
//!
//! [`MemStore`]: crate::db::store::MemStore

pub mod pet;
pub mod subscription;
pub mod user;
pub mod waitlist;
