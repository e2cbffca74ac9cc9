//! Authorization checks
//!
//! Two rules exist:
//!
//! 1. **Ownership**: pets and subscriptions are visible only to the user who
//!    owns them.
//! 2. **Admin**: the admin views require the user's admin flag.
//!
//! # Example
//!
//! ```
//! use moracat_shared::auth::authorization::{require_ownership, AuthzError};
//! use moracat_shared::auth::context::AuthContext;
//! use uuid::Uuid;
//!
//! let auth = AuthContext {
//!     user_id: 1,
//!     is_admin: false,
//!     session_id: Uuid::new_v4(),
//!     session_expires_at: 0,
//! };
//! assert!(require_ownership(&auth, 1).is_ok());
//! assert!(matches!(require_ownership(&auth, 2), Err(AuthzError::NotOwner)));
//! ```

use super::context::AuthContext;

/// Error type for authorization checks
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthzError {
    /// Resource belongs to another user
    #[error("Not authorized to access this resource")]
    NotOwner,

    #[error("Administrator access required")]
    AdminRequired,
}

/// Requires the caller to own a resource
pub fn require_ownership(auth: &AuthContext, resource_owner_id: i64) -> Result<(), AuthzError> {
    if auth.user_id != resource_owner_id {
        tracing::warn!(
            user_id = auth.user_id,
            owner_id = resource_owner_id,
            "Ownership check failed"
        );
        return Err(AuthzError::NotOwner);
    }

    Ok(())
}

pub fn require_admin(auth: &AuthContext) -> Result<(), AuthzError> {
    if !auth.is_admin {
        tracing::warn!(user_id = auth.user_id, "Admin check failed");
        return Err(AuthzError::AdminRequired);
    }

    Ok(())
}
