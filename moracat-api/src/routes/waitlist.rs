//! Launch waitlist
//!
//! `POST /api/waitlist` is public: the landing page posts here before the
//! visitor has an account.

use crate::{app::AppState, error::ApiResult, extract::ValidatedJson};
use axum::{extract::State, http::StatusCode, Json};
use moracat_shared::models::waitlist::{CreateWaitlistEntry, WaitlistEntry};
use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct JoinWaitlistRequest {
    #[validate(length(min = 1, max = 100, message = "Full name is required"))]
    pub full_name: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(max = 30, message = "Phone number is too long"))]
    pub phone: Option<String>,

    #[validate(length(max = 1000, message = "Cat information is too long"))]
    pub cat_info: Option<String>,

    #[serde(default)]
    pub newsletter_opt_in: bool,
}

/// Blank optional fields are stored as absent
fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

pub async fn join_waitlist(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<JoinWaitlistRequest>,
) -> ApiResult<(StatusCode, Json<WaitlistEntry>)> {
    let entry = WaitlistEntry::create(
        &state.store,
        CreateWaitlistEntry {
            full_name: req.full_name,
            email: req.email,
            phone: non_blank(req.phone),
            cat_info: non_blank(req.cat_info),
            newsletter_opt_in: req.newsletter_opt_in,
        },
    )?;

    tracing::info!(entry_id = entry.id, newsletter = entry.newsletter_opt_in, "Waitlist signup");

    Ok((StatusCode::CREATED, Json(entry)))
}
