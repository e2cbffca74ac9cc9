//! Waitlist signups collected from the landing page

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::db::store::{MemStore, StoreError};

/// Someone who asked to be told when the service launches
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WaitlistEntry {
    pub id: i64,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,

    /// Free-text description of the cat(s)
    pub cat_info: Option<String>,

    pub newsletter_opt_in: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct CreateWaitlistEntry {
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub cat_info: Option<String>,
    pub newsletter_opt_in: bool,
}

impl WaitlistEntry {
    pub fn create(store: &MemStore, data: CreateWaitlistEntry) -> Result<Self, StoreError> {
        let mut tables = store.write()?;

        let entry = WaitlistEntry {
            id: tables.waitlist_ids.next(),
            full_name: data.full_name,
            email: data.email,
            phone: data.phone,
            cat_info: data.cat_info,
            newsletter_opt_in: data.newsletter_opt_in,
            created_at: Utc::now(),
        };
        tables.waitlist.insert(entry.id, entry.clone());

        Ok(entry)
    }

    pub fn list(store: &MemStore) -> Result<Vec<Self>, StoreError> {
        Ok(store.read()?.waitlist.values().cloned().collect())
    }
}
