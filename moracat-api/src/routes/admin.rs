//! Admin views
//!
//! Every handler here starts with [`require_admin`]; the session layer has
//! already loaded the caller's current admin flag.
//!
//! - `GET   /api/admin/users`
//! - `PATCH /api/admin/users/:id` - Grant or remove admin
//! - `GET   /api/admin/waitlist`
//! - `GET   /api/admin/subscriptions`

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    extract::{parse_id, ValidatedJson},
};
use axum::{
    extract::{Path, State},
    Extension, Json,
};
use moracat_shared::{
    auth::{authorization::require_admin, context::AuthContext},
    models::{subscription::Subscription, user::User, waitlist::WaitlistEntry},
};
use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    pub is_admin: bool,
}

pub async fn list_users(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<Vec<User>>> {
    require_admin(&auth)?;
    Ok(Json(User::list(&state.store)?))
}

/// # Errors
///
/// - `400 Bad Request`: non-numeric id, or an admin removing their own flag
/// - `404 Not Found`: no such user
pub async fn update_user(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<UpdateUserRequest>,
) -> ApiResult<Json<User>> {
    require_admin(&auth)?;
    let id = parse_id(&id, "user")?;

    if id == auth.user_id && !req.is_admin {
        return Err(ApiError::BadRequest(
            "Admins cannot remove their own admin access".to_string(),
        ));
    }

    let user = User::set_admin(&state.store, id, req.is_admin)?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    tracing::info!(admin_id = auth.user_id, user_id = user.id, is_admin = user.is_admin, "Admin flag changed");

    Ok(Json(user))
}

pub async fn list_waitlist(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<Vec<WaitlistEntry>>> {
    require_admin(&auth)?;
    Ok(Json(WaitlistEntry::list(&state.store)?))
}

pub async fn list_subscriptions(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<Vec<Subscription>>> {
    require_admin(&auth)?;
    Ok(Json(Subscription::list(&state.store)?))
}
