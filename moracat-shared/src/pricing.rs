//! Subscription price model
//!
//! Every price is a whole number of SAR. A subscription's total is the plan's
//! base price plus the price of each selected add-on:
//!
//! ```text
//! total = base(plan) + Σ price(addon)
//! ```
//!
//! | Plan    | Base | Add-on | Price |
//! |---------|------|--------|-------|
//! | basic   | 210  | litter | 75    |
//! | premium | 280  | toys   | 50    |
//! | vip     | 350  | treats | 35    |
//!
//! # Example
//!
//! ```
//! use moracat_shared::pricing::{quote, AddOn, Plan};
//!
//! let total = quote(Plan::Premium, [AddOn::Litter, AddOn::Treats]);
//! assert_eq!(total, 390);
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Currency every price is expressed in
pub const CURRENCY: &str = "SAR";

/// Subscription tier
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Plan {
    Basic,
    #[default]
    Premium,
    Vip,
}

impl Plan {
    /// All plans, cheapest first
    pub const ALL: [Plan; 3] = [Plan::Basic, Plan::Premium, Plan::Vip];

    /// Monthly base price of the plan
    pub const fn base_price(self) -> u32 {
        match self {
            Plan::Basic => 210,
            Plan::Premium => 280,
            Plan::Vip => 350,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Plan::Basic => "basic",
            Plan::Premium => "premium",
            Plan::Vip => "vip",
        }
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Plan {
    type Err = UnknownOption;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "basic" => Ok(Plan::Basic),
            "premium" => Ok(Plan::Premium),
            "vip" => Ok(Plan::Vip),
            other => Err(UnknownOption(other.to_string())),
        }
    }
}

/// Optional extra added on top of a plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AddOn {
    Litter,
    Toys,
    Treats,
}

impl AddOn {
    pub const ALL: [AddOn; 3] = [AddOn::Litter, AddOn::Toys, AddOn::Treats];

    /// Monthly price of the add-on
    pub const fn price(self) -> u32 {
        match self {
            AddOn::Litter => 75,
            AddOn::Toys => 50,
            AddOn::Treats => 35,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AddOn::Litter => "litter",
            AddOn::Toys => "toys",
            AddOn::Treats => "treats",
        }
    }
}

impl fmt::Display for AddOn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AddOn {
    type Err = UnknownOption;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "litter" => Ok(AddOn::Litter),
            "toys" => Ok(AddOn::Toys),
            "treats" => Ok(AddOn::Treats),
            other => Err(UnknownOption(other.to_string())),
        }
    }
}

/// Returned when parsing a plan or add-on name that doesn't exist
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown option: {0}")]
pub struct UnknownOption(pub String);

/// Computes the monthly total for a plan and a set of add-ons
///
/// Add-ons are treated as a set: repeating one does not charge it twice.
pub fn quote(plan: Plan, addons: impl IntoIterator<Item = AddOn>) -> u32 {
    let addons: BTreeSet<AddOn> = addons.into_iter().collect();
    plan.base_price() + addons.iter().map(|a| a.price()).sum::<u32>()
}

/// Plan and add-on choice being assembled by a customer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionSelection {
    plan: Plan,
    addons: BTreeSet<AddOn>,
}

impl SubscriptionSelection {
    /// Starts from the premium plan with no add-ons
    pub fn new() -> Self {
        Self::default()
    }

    pub fn plan(&self) -> Plan {
        self.plan
    }

    pub fn addons(&self) -> &BTreeSet<AddOn> {
        &self.addons
    }

    pub fn select_plan(&mut self, plan: Plan) {
        self.plan = plan;
    }

    /// Adds the add-on if absent, removes it if present
    ///
    /// Returns whether the add-on is selected afterwards.
    pub fn toggle_addon(&mut self, addon: AddOn) -> bool {
        if self.addons.remove(&addon) {
            false
        } else {
            self.addons.insert(addon);
            true
        }
    }

    pub fn total(&self) -> u32 {
        quote(self.plan, self.addons.iter().copied())
    }
}

/// Priced plan entry in the catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanPrice {
    pub plan: Plan,
    pub price: u32,
}

/// Priced add-on entry in the catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddOnPrice {
    pub addon: AddOn,
    pub price: u32,
}

/// Full price list
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    pub currency: String,
    pub plans: Vec<PlanPrice>,
    pub addons: Vec<AddOnPrice>,
}

pub fn catalog() -> Catalog {
    Catalog {
        currency: CURRENCY.to_string(),
        plans: Plan::ALL
            .iter()
            .map(|&plan| PlanPrice {
                plan,
                price: plan.base_price(),
            })
            .collect(),
        addons: AddOn::ALL
            .iter()
            .map(|&addon| AddOnPrice {
                addon,
                price: addon.price(),
            })
            .collect(),
    }
}
