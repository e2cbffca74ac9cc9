//! Authentication endpoints
//!
//! - `POST /api/register` - Create an account and start a session
//! - `POST /api/login` - Start a session
//! - `POST /api/logout` - End the current session
//! - `GET  /api/user` - The logged-in user
//!
//! Sessions are returned in the `moracat_session` cookie. The token is not
//! part of any response body.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    extract::ValidatedJson,
};
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Extension, Json,
};
use moracat_shared::{
    auth::{context::AuthContext, password, session},
    models::user::{CreateUser, User},
};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Register request
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(length(min = 3, max = 50, message = "Username must be 3 to 50 characters"))]
    pub username: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,

    #[validate(length(max = 100, message = "Name must be at most 100 characters"))]
    pub full_name: Option<String>,
}

/// Login request
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LogoutResponse {
    pub message: &'static str,
}

/// Signs a session for `user` and attaches it as a cookie
fn with_session(state: &AppState, status: StatusCode, user: User) -> ApiResult<Response> {
    let ttl = state.config.session_ttl();
    let (token, _) = session::create_session_token(user.id, state.session_secret(), ttl)?;
    let cookie = session::session_cookie(&token, ttl, state.config.api.production);

    Ok((status, [(header::SET_COOKIE, cookie)], Json(user)).into_response())
}

/// Register a new user
///
/// ```text
/// POST /api/register
///
/// { "username": "layla", "email": "layla@example.com", "password": "mishmish", "fullName": "Layla A." }
/// ```
///
/// Responds `201` with the user. Usernames listed in `ADMIN_USERNAMES` are
/// created as admins.
///
/// # Errors
///
/// - `400 Bad Request`: validation failed, or username/email already taken
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<RegisterRequest>,
) -> ApiResult<Response> {
    let password_hash = password::hash_password(&req.password)?;
    let is_admin = state.config.is_admin_username(&req.username);

    let user = User::create(
        &state.store,
        CreateUser {
            username: req.username,
            email: req.email,
            password_hash,
            full_name: req.full_name.filter(|name| !name.trim().is_empty()),
            is_admin,
        },
    )?;

    tracing::info!(user_id = user.id, username = %user.username, is_admin, "User registered");

    with_session(&state, StatusCode::CREATED, user)
}

/// Login with username and password
///
/// # Errors
///
/// - `400 Bad Request`: empty username or password
/// - `401 Unauthorized`: unknown username or wrong password (same message)
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> ApiResult<Response> {
    let invalid = || ApiError::Unauthorized("Invalid username or password".to_string());

    let user = User::find_by_username(&state.store, &req.username)?.ok_or_else(invalid)?;

    if !password::verify_password(&req.password, &user.password_hash)? {
        tracing::warn!(user_id = user.id, "Failed login attempt");
        return Err(invalid());
    }

    tracing::info!(user_id = user.id, "User logged in");

    with_session(&state, StatusCode::OK, user)
}

/// Logout
///
/// Revokes the session so the token is useless even if it was copied, and
/// tells the browser to drop the cookie.
pub async fn logout(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Response> {
    session::revoke(&state.store, auth.session_id, auth.session_expires_at)?;
    tracing::info!(user_id = auth.user_id, "User logged out");

    let cookie = session::clear_session_cookie(state.config.api.production);
    Ok((
        [(header::SET_COOKIE, cookie)],
        Json(LogoutResponse {
            message: "Logged out",
        }),
    )
        .into_response())
}

/// The logged-in user
pub async fn current_user(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<User>> {
    let user = User::find_by_id(&state.store, auth.user_id)?
        .ok_or_else(|| ApiError::Unauthorized("Unauthorized".to_string()))?;

    Ok(Json(user))
}
