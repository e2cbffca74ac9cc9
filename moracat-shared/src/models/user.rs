//! User model and store operations
//!
//! Users are created on registration and never edited afterwards, with one
//! exception: an administrator can grant or remove the admin flag.
//!
//! # Wire format
//!
//! ```json
//! {
//!   "id": 1,
//!   "username": "layla",
//!   "email": "layla@example.com",
//!   "fullName": "Layla Haddad",
//!   "isAdmin": false,
//!   "createdAt": "2025-03-01T12:00:00Z"
//! }
//! ```
//!
//! The password hash is never serialized.
//!
//! # Example
//!
//! ```
//! use moracat_shared::db::store::MemStore;
//! use moracat_shared::models::user::{CreateUser, User};
//!
//! # fn example() -> Result<(), moracat_shared::db::store::StoreError> {
//! let store = MemStore::new();
//! let user = User::create(&store, CreateUser {
//!     username: "layla".to_string(),
//!     email: "layla@example.com".to_string(),
//!     password_hash: "$argon2id$...".to_string(),
//!     full_name: None,
//!     is_admin: false,
//! })?;
//!
//! assert_eq!(user.id, 1);
//! assert!(User::find_by_username(&store, "layla")?.is_some());
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::db::store::{MemStore, StoreError};

/// Registered customer or administrator
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Auto-increment id, starting at 1
    pub id: i64,

    /// Login name, unique
    pub username: String,

    /// Email address, unique (compared case-insensitively)
    pub email: String,

    /// Argon2id password hash
    #[serde(skip_serializing)]
    pub password_hash: String,

    pub full_name: Option<String>,

    /// Grants access to the admin views
    pub is_admin: bool,

    pub created_at: DateTime<Utc>,
}

/// Input for creating a new user
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub username: String,
    pub email: String,

    /// Argon2id password hash (NOT plaintext password!)
    pub password_hash: String,

    pub full_name: Option<String>,
    pub is_admin: bool,
}

impl User {
    /// Inserts a new user
    ///
    /// # Errors
    ///
    /// - `StoreError::Duplicate { field: "username" }` if the username is taken
    /// - `StoreError::Duplicate { field: "email" }` if the email is taken
    pub fn create(store: &MemStore, data: CreateUser) -> Result<Self, StoreError> {
        let mut tables = store.write()?;

        if tables.users.values().any(|u| u.username == data.username) {
            return Err(StoreError::Duplicate { field: "username" });
        }
        if tables
            .users
            .values()
            .any(|u| u.email.eq_ignore_ascii_case(&data.email))
        {
            return Err(StoreError::Duplicate { field: "email" });
        }

        let user = User {
            id: tables.user_ids.next(),
            username: data.username,
            email: data.email,
            password_hash: data.password_hash,
            full_name: data.full_name,
            is_admin: data.is_admin,
            created_at: Utc::now(),
        };
        tables.users.insert(user.id, user.clone());

        Ok(user)
    }

    pub fn find_by_id(store: &MemStore, id: i64) -> Result<Option<Self>, StoreError> {
        Ok(store.read()?.users.get(&id).cloned())
    }

    pub fn find_by_username(store: &MemStore, username: &str) -> Result<Option<Self>, StoreError> {
        Ok(store
            .read()?
            .users
            .values()
            .find(|u| u.username == username)
            .cloned())
    }

    /// Email lookup is case-insensitive
    pub fn find_by_email(store: &MemStore, email: &str) -> Result<Option<Self>, StoreError> {
        Ok(store
            .read()?
            .users
            .values()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    /// Grants or removes the admin flag
    ///
    /// Returns the updated user, or `None` if no user has this id.
    pub fn set_admin(store: &MemStore, id: i64, is_admin: bool) -> Result<Option<Self>, StoreError> {
        let mut tables = store.write()?;
        Ok(tables.users.get_mut(&id).map(|user| {
            user.is_admin = is_admin;
            user.clone()
        }))
    }

    /// All users, ordered by id
    pub fn list(store: &MemStore) -> Result<Vec<Self>, StoreError> {
        Ok(store.read()?.users.values().cloned().collect())
    }
}
