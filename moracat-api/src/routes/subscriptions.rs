//! Subscription endpoints
//!
//! - `POST  /api/subscriptions` - Subscribe one of the session user's pets
//! - `GET   /api/subscriptions` - The session user's subscriptions
//! - `GET   /api/subscriptions/:id` - One subscription, owner only
//! - `PATCH /api/subscriptions/:id` - Change status, owner only
//!
//! The price is always computed here from the plan and add-ons and frozen on
//! the record. A client may send the price it displayed; if it disagrees
//! with the server's quote the request is rejected rather than silently
//! charging a different amount.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    extract::{parse_id, ValidatedJson},
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use moracat_shared::{
    auth::{authorization::require_ownership, context::AuthContext},
    models::{
        pet::Pet,
        subscription::{CreateSubscription, Subscription, SubscriptionStatus},
    },
    pricing::{quote, AddOn, Plan},
};
use serde::Deserialize;
use std::collections::BTreeSet;
use validator::Validate;

/// Create subscription request
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateSubscriptionRequest {
    #[validate(range(min = 1, message = "Invalid pet ID"))]
    pub pet_id: i64,

    pub plan: Plan,

    #[serde(default)]
    pub addons: BTreeSet<AddOn>,

    #[serde(default)]
    pub status: SubscriptionStatus,

    /// Price the client showed the user, checked against the quote
    pub price: Option<u32>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateSubscriptionRequest {
    pub status: SubscriptionStatus,
}

/// Create a subscription
///
/// # Errors
///
/// - `400 Bad Request`: unknown plan or add-on, or a price that does not
///   match the quote
/// - `403 Forbidden`: the pet does not exist or belongs to someone else
pub async fn create_subscription(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    ValidatedJson(req): ValidatedJson<CreateSubscriptionRequest>,
) -> ApiResult<(StatusCode, Json<Subscription>)> {
    // An unknown pet is reported the same way as someone else's pet
    match Pet::find_by_id(&state.store, req.pet_id)? {
        Some(pet) => require_ownership(&auth, pet.user_id)?,
        None => {
            tracing::warn!(user_id = auth.user_id, pet_id = req.pet_id, "Subscription for unknown pet");
            return Err(ApiError::Forbidden("Forbidden".to_string()));
        }
    }

    let expected = quote(req.plan, req.addons.iter().copied());
    if let Some(price) = req.price {
        if price != expected {
            return Err(ApiError::BadRequest(format!(
                "Price {} does not match the quoted price {}",
                price, expected
            )));
        }
    }

    let subscription = Subscription::create(
        &state.store,
        CreateSubscription {
            user_id: auth.user_id,
            pet_id: req.pet_id,
            plan: req.plan,
            addons: req.addons,
            status: req.status,
        },
    )?;

    tracing::info!(
        subscription_id = subscription.id,
        pet_id = subscription.pet_id,
        plan = %subscription.plan,
        price = subscription.price,
        "Subscription created"
    );

    Ok((StatusCode::CREATED, Json(subscription)))
}

pub async fn list_subscriptions(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<Vec<Subscription>>> {
    Ok(Json(Subscription::list_by_user(&state.store, auth.user_id)?))
}

/// Loads a subscription the caller owns
fn owned_subscription(state: &AppState, auth: &AuthContext, raw_id: &str) -> ApiResult<Subscription> {
    let id = parse_id(raw_id, "subscription")?;

    let subscription = Subscription::find_by_id(&state.store, id)?
        .ok_or_else(|| ApiError::NotFound("Subscription not found".to_string()))?;

    require_ownership(auth, subscription.user_id)?;

    Ok(subscription)
}

pub async fn get_subscription(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<String>,
) -> ApiResult<Json<Subscription>> {
    Ok(Json(owned_subscription(&state, &auth, &id)?))
}

/// Change a subscription's status
///
/// ```text
/// PATCH /api/subscriptions/3
///
/// { "status": "paused" }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: non-numeric id, unknown status, or reviving a
///   cancelled subscription
/// - `403 Forbidden`: not the caller's subscription
/// - `404 Not Found`: no such subscription
pub async fn update_subscription(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<UpdateSubscriptionRequest>,
) -> ApiResult<Json<Subscription>> {
    let current = owned_subscription(&state, &auth, &id)?;

    if !current.status.can_transition_to(req.status) {
        return Err(ApiError::BadRequest(format!(
            "A {} subscription cannot become {}",
            current.status, req.status
        )));
    }

    let updated = Subscription::update_status(&state.store, current.id, req.status)?
        .ok_or_else(|| ApiError::NotFound("Subscription not found".to_string()))?;

    tracing::info!(
        subscription_id = updated.id,
        from = %current.status,
        to = %updated.status,
        "Subscription status changed"
    );

    Ok(Json(updated))
}
