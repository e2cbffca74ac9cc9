//! In-memory table storage
//!
//! A [`MemStore`] is a cheap-to-clone handle onto one set of tables guarded by
//! a single `RwLock`. Each model operation takes the lock once, performs its
//! map reads or writes, and releases it before returning, so no caller ever
//! holds the lock across an `.await`.
//!
//! Ids are allocated per table from 1 and never reused.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::Serialize;
use uuid::Uuid;

use crate::models::{pet::Pet, subscription::Subscription, user::User, waitlist::WaitlistEntry};

/// Error type for store operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A writer panicked while holding the lock
    #[error("store lock poisoned")]
    Poisoned,

    /// Unique field already taken
    #[error("{field} already exists")]
    Duplicate { field: &'static str },
}

/// Monotonic id allocator starting at 1
#[derive(Debug)]
pub(crate) struct IdSequence(i64);

impl Default for IdSequence {
    fn default() -> Self {
        Self(1)
    }
}

impl IdSequence {
    pub(crate) fn next(&mut self) -> i64 {
        let id = self.0;
        self.0 += 1;
        id
    }
}

/// All tables, keyed by id
///
/// `BTreeMap` keeps listings in creation order.
#[derive(Debug, Default)]
pub(crate) struct Tables {
    pub(crate) users: BTreeMap<i64, User>,
    pub(crate) pets: BTreeMap<i64, Pet>,
    pub(crate) subscriptions: BTreeMap<i64, Subscription>,
    pub(crate) waitlist: BTreeMap<i64, WaitlistEntry>,
    /// Logged-out session ids and the unix time their token expires
    pub(crate) revoked_sessions: HashMap<Uuid, i64>,
    pub(crate) user_ids: IdSequence,
    pub(crate) pet_ids: IdSequence,
    pub(crate) subscription_ids: IdSequence,
    pub(crate) waitlist_ids: IdSequence,
}

/// Row counts, reported by the health check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StoreStats {
    pub users: usize,
    pub pets: usize,
    pub subscriptions: usize,
    pub waitlist: usize,
}

/// Shared handle onto the in-memory tables
#[derive(Debug, Clone, Default)]
pub struct MemStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn read(&self) -> Result<RwLockReadGuard<'_, Tables>, StoreError> {
        self.tables.read().map_err(|_| StoreError::Poisoned)
    }

    pub(crate) fn write(&self) -> Result<RwLockWriteGuard<'_, Tables>, StoreError> {
        self.tables.write().map_err(|_| StoreError::Poisoned)
    }

    /// Current row count of each table
    pub fn stats(&self) -> Result<StoreStats, StoreError> {
        let tables = self.read()?;
        Ok(StoreStats {
            users: tables.users.len(),
            pets: tables.pets.len(),
            subscriptions: tables.subscriptions.len(),
            waitlist: tables.waitlist.len(),
        })
    }
}
