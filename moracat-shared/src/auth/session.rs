//! Login sessions
//!
//! A session is an HS256-signed JWT naming the user and carrying a random
//! session id (`jti`). Browsers receive it in the `moracat_session` HttpOnly
//! cookie; API clients may send it as `Authorization: Bearer <token>`.
//! Logging out records the session id as revoked, so a copied token stops
//! working even before it expires.
//!
//! # Claims
//!
//! - `sub`: user id
//! - `iss`: always `"moracat"`
//! - `iat` / `nbf` / `exp`: Unix timestamps
//! - `jti`: session id
//!
//! # Example
//!
//! ```
//! use chrono::Duration;
//! use moracat_shared::auth::session::{create_session_token, validate_session_token};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let secret = "a-session-secret-of-at-least-32-bytes";
//! let (token, claims) = create_session_token(7, secret, Duration::hours(1))?;
//!
//! let validated = validate_session_token(&token, secret)?;
//! assert_eq!(validated.sub, 7);
//! assert_eq!(validated.jti, claims.jti);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::db::store::{MemStore, StoreError};

/// Token issuer
pub const ISSUER: &str = "moracat";

/// Name of the session cookie
pub const SESSION_COOKIE: &str = "moracat_session";

/// Error type for session token operations
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Failed to create session token: {0}")]
    Create(String),

    #[error("Session has expired")]
    Expired,

    #[error("Invalid session token: {0}")]
    Invalid(String),
}

/// Session token claims
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// User id
    pub sub: i64,
    pub iss: String,
    pub iat: i64,
    pub nbf: i64,
    pub exp: i64,

    /// Session id, revoked on logout
    pub jti: Uuid,
}

impl SessionClaims {
    pub fn new(user_id: i64, ttl: Duration) -> Self {
        let now = Utc::now();
        Self {
            sub: user_id,
            iss: ISSUER.to_string(),
            iat: now.timestamp(),
            nbf: now.timestamp(),
            exp: (now + ttl).timestamp(),
            jti: Uuid::new_v4(),
        }
    }
}

/// Starts a session for a user
///
/// Returns the signed token and the claims inside it.
pub fn create_session_token(
    user_id: i64,
    secret: &str,
    ttl: Duration,
) -> Result<(String, SessionClaims), SessionError> {
    let claims = SessionClaims::new(user_id, ttl);
    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| SessionError::Create(e.to_string()))?;

    Ok((token, claims))
}

/// Checks signature, issuer, `nbf` and `exp`, returning the claims
///
/// Revocation is checked separately with [`is_revoked`].
pub fn validate_session_token(token: &str, secret: &str) -> Result<SessionClaims, SessionError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[ISSUER]);
    validation.validate_exp = true;
    validation.validate_nbf = true;
    validation.leeway = 0;

    decode::<SessionClaims>(token, &DecodingKey::from_secret(secret.as_bytes()), &validation)
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => SessionError::Expired,
            _ => SessionError::Invalid(e.to_string()),
        })
}

/// Marks a session id as logged out until its token expires at `expires_at`
///
/// Entries whose token has already expired are dropped on the way.
pub fn revoke(store: &MemStore, session_id: Uuid, expires_at: i64) -> Result<(), StoreError> {
    let now = Utc::now().timestamp();
    let mut tables = store.write()?;
    tables.revoked_sessions.retain(|_, exp| *exp >= now);
    tables.revoked_sessions.insert(session_id, expires_at);
    Ok(())
}

pub fn is_revoked(store: &MemStore, session_id: Uuid) -> Result<bool, StoreError> {
    Ok(store.read()?.revoked_sessions.contains_key(&session_id))
}

/// Finds the session token in a `Cookie` request header value
pub fn token_from_cookie_header(header: &str) -> Option<&str> {
    header
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value)
        .filter(|value| !value.is_empty())
}

/// `Set-Cookie` value carrying a session token
pub fn session_cookie(token: &str, ttl: Duration, secure: bool) -> String {
    let mut cookie = format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        SESSION_COOKIE,
        token,
        ttl.num_seconds()
    );
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// `Set-Cookie` value that deletes the session cookie
pub fn clear_session_cookie(secure: bool) -> String {
    session_cookie("", Duration::zero(), secure)
}
