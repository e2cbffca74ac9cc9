//! Subscription model
//!
//! A subscription ties one user's pet to a plan and a set of add-ons. Its
//! `price` is a snapshot taken from [`crate::pricing::quote`] when the record
//! is created; later price list changes do not touch existing rows.
//!
//! # Status lifecycle
//!
//! ```text
//! active ⇄ paused
//!    │        │
//!    └──▶ cancelled (terminal)
//! ```

use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::db::store::{MemStore, StoreError};
use crate::pricing::{quote, AddOn, Plan};

/// Subscription lifecycle state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionStatus {
    #[default]
    Active,
    Paused,
    Cancelled,
}

impl SubscriptionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriptionStatus::Active => "active",
            SubscriptionStatus::Paused => "paused",
            SubscriptionStatus::Cancelled => "cancelled",
        }
    }

    /// Whether a subscription may move from `self` to `next`
    ///
    /// Cancelled is terminal; every other move (including staying put) is allowed.
    pub fn can_transition_to(&self, next: SubscriptionStatus) -> bool {
        *self != SubscriptionStatus::Cancelled || next == SubscriptionStatus::Cancelled
    }
}

impl fmt::Display for SubscriptionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A pet's food subscription
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    pub id: i64,
    pub user_id: i64,
    pub pet_id: i64,
    pub plan: Plan,
    pub addons: BTreeSet<AddOn>,

    /// Monthly price frozen at creation
    pub price: u32,

    pub status: SubscriptionStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a subscription
///
/// The price is not an input: it is quoted from `plan` and `addons`.
#[derive(Debug, Clone)]
pub struct CreateSubscription {
    pub user_id: i64,
    pub pet_id: i64,
    pub plan: Plan,
    pub addons: BTreeSet<AddOn>,
    pub status: SubscriptionStatus,
}

impl Subscription {
    pub fn create(store: &MemStore, data: CreateSubscription) -> Result<Self, StoreError> {
        let mut tables = store.write()?;
        let now = Utc::now();

        let subscription = Subscription {
            id: tables.subscription_ids.next(),
            user_id: data.user_id,
            pet_id: data.pet_id,
            plan: data.plan,
            price: quote(data.plan, data.addons.iter().copied()),
            addons: data.addons,
            status: data.status,
            created_at: now,
            updated_at: now,
        };
        tables.subscriptions.insert(subscription.id, subscription.clone());

        Ok(subscription)
    }

    pub fn find_by_id(store: &MemStore, id: i64) -> Result<Option<Self>, StoreError> {
        Ok(store.read()?.subscriptions.get(&id).cloned())
    }

    /// Subscriptions owned by a user, ordered by id
    pub fn list_by_user(store: &MemStore, user_id: i64) -> Result<Vec<Self>, StoreError> {
        Ok(store
            .read()?
            .subscriptions
            .values()
            .filter(|s| s.user_id == user_id)
            .cloned()
            .collect())
    }

    /// Every subscription, ordered by id
    pub fn list(store: &MemStore) -> Result<Vec<Self>, StoreError> {
        Ok(store.read()?.subscriptions.values().cloned().collect())
    }

    /// Sets the status and bumps `updated_at`
    ///
    /// Returns `None` if no subscription has this id. Transition rules are
    /// the caller's concern; see [`SubscriptionStatus::can_transition_to`].
    pub fn update_status(
        store: &MemStore,
        id: i64,
        status: SubscriptionStatus,
    ) -> Result<Option<Self>, StoreError> {
        let mut tables = store.write()?;
        Ok(tables.subscriptions.get_mut(&id).map(|subscription| {
            subscription.status = status;
            subscription.updated_at = Utc::now();
            subscription.clone()
        }))
    }

    pub fn is_owned_by(&self, user_id: i64) -> bool {
        self.user_id == user_id
    }
}
