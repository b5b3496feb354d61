//! Registered user entity and its sanitised projection.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Authorisation role of a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Manages the catalogue and other users.
    Admin,
    /// Borrows books.
    Member,
}

/// A registered user as persisted by the user store.
///
/// The password digest never leaves the domain; API responses use
/// [`UserProfile`] instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Store-assigned identity, monotonic from 1.
    pub id: i64,
    /// Unique login name.
    pub username: String,
    /// Salted SHA-256 digest of the password, hex encoded.
    pub password_digest: String,
    /// Authorisation role.
    pub role: Role,
    /// Display name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Contact phone number.
    pub phone: String,
    /// Registration instant.
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Sanitised projection safe to return to clients.
    #[must_use]
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            id: self.id,
            username: self.username.clone(),
            role: self.role,
            name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            created_at: self.created_at,
        }
    }
}

/// A user with the credential material stripped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// Store-assigned identity.
    pub id: i64,
    /// Unique login name.
    pub username: String,
    /// Authorisation role.
    pub role: Role,
    /// Display name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Contact phone number.
    pub phone: String,
    /// Registration instant.
    pub created_at: DateTime<Utc>,
}
