//! Pricing endpoints (public)
//!
//! - `GET  /api/plans` - The price list
//! - `POST /api/quote` - Total for a plan and add-ons
//!
//! ```text
//! POST /api/quote
//!
//! { "plan": "premium", "addons": ["litter", "treats"] }
//! ```
//!
//! ```json
//! { "plan": "premium", "addons": ["litter", "treats"], "total": 390, "currency": "SAR" }
//! ```

use crate::{error::ApiResult, extract::ValidatedJson};
use axum::Json;
use moracat_shared::pricing::{self, AddOn, Catalog, Plan, CURRENCY};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct QuoteRequest {
    pub plan: Plan,

    #[serde(default)]
    pub addons: BTreeSet<AddOn>,
}

#[derive(Debug, Serialize)]
pub struct QuoteResponse {
    pub plan: Plan,

    /// Selected add-ons, deduplicated
    pub addons: BTreeSet<AddOn>,

    pub total: u32,
    pub currency: &'static str,
}

pub async fn list_plans() -> Json<Catalog> {
    Json(pricing::catalog())
}

/// Unknown plan or add-on names are a 400
pub async fn quote(ValidatedJson(req): ValidatedJson<QuoteRequest>) -> ApiResult<Json<QuoteResponse>> {
    let total = pricing::quote(req.plan, req.addons.iter().copied());

    Ok(Json(QuoteResponse {
        plan: req.plan,
        addons: req.addons,
        total,
        currency: CURRENCY,
    }))
}
