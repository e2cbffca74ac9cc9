//! Authenticated request context
//!
//! The API's session layer resolves the session token to a user and inserts
//! an [`AuthContext`] into the request extensions. Handlers take it with
//! axum's `Extension` extractor:
//!
//! ```ignore
//! async fn handler(Extension(auth): Extension<AuthContext>) -> String {
//!     format!("User: {}", auth.user_id)
//! }
//! ```

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::session::SessionClaims;
use crate::models::user::User;

/// Who is making the request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthContext {
    /// Authenticated user id
    pub user_id: i64,

    /// Admin flag as stored when the request arrived
    pub is_admin: bool,

    /// Session id, used to revoke the session on logout
    pub session_id: Uuid,

    /// Unix time the session token expires
    pub session_expires_at: i64,
}

impl AuthContext {
    /// Builds the context from validated claims and the user they name
    pub fn from_session(claims: &SessionClaims, user: &User) -> Self {
        Self {
            user_id: user.id,
            is_admin: user.is_admin,
            session_id: claims.jti,
            session_expires_at: claims.exp,
        }
    }
}
