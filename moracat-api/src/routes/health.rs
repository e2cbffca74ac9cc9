//! Health check endpoint
//!
//! ```text
//! GET /health
//! ```
//!
//! ```json
//! {
//!   "status": "healthy",
//!   "version": "0.1.0",
//!   "store": { "users": 2, "pets": 3, "subscriptions": 1, "waitlist": 0 }
//! }
//! ```

use crate::app::AppState;
use axum::{extract::State, Json};
use moracat_shared::db::store::StoreStats;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// `healthy`, or `degraded` when the store cannot be read
    pub status: &'static str,

    pub version: &'static str,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub store: Option<StoreStats>,
}

pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let store = match state.store.stats() {
        Ok(stats) => Some(stats),
        Err(e) => {
            tracing::error!(error = %e, "Store unavailable");
            None
        }
    };

    Json(HealthResponse {
        status: if store.is_some() { "healthy" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        store,
    })
}
