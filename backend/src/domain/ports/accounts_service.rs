//! Driving port for account registration, login, and administration.

use async_trait::async_trait;

use crate::domain::{Error, Role, UserProfile};

/// Registration payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterRequest {
    /// Requested login name; unique.
    pub username: String,
    /// Plaintext password, digested before storage.
    pub password: String,
    /// Display name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Contact phone number.
    pub phone: String,
}

/// Login payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Login name.
    pub username: String,
    /// Plaintext password.
    pub password: String,
}

/// Field-level merge payload for a user update.
///
/// Absent fields keep their stored value; a present password re-digests.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UserPatch {
    /// New display name.
    pub name: Option<String>,
    /// New contact email.
    pub email: Option<String>,
    /// New contact phone number.
    pub phone: Option<String>,
    /// New authorisation role.
    pub role: Option<Role>,
    /// New plaintext password.
    pub password: Option<String>,
}

/// Port executing account operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountsService: Send + Sync {
    /// Register a member account.
    async fn register(&self, request: RegisterRequest) -> Result<UserProfile, Error>;

    /// Verify credentials and return the sanitised profile.
    async fn login(&self, credentials: Credentials) -> Result<UserProfile, Error>;

    /// All sanitised profiles in identity order.
    async fn list_users(&self) -> Result<Vec<UserProfile>, Error>;

    /// Merge a patch into an existing user.
    async fn update_user(&self, id: i64, patch: UserPatch) -> Result<UserProfile, Error>;

    /// Delete a non-admin user.
    async fn delete_user(&self, id: i64) -> Result<(), Error>;
}

/// Fixture implementation for tests that do not exercise accounts.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureAccountsService;

#[async_trait]
impl AccountsService for FixtureAccountsService {
    async fn register(&self, request: RegisterRequest) -> Result<UserProfile, Error> {
        Ok(UserProfile {
            id: 1,
            username: request.username,
            role: Role::Member,
            name: request.name,
            email: request.email,
            phone: request.phone,
            created_at: chrono::Utc::now(),
        })
    }

    async fn login(&self, _credentials: Credentials) -> Result<UserProfile, Error> {
        Err(Error::unauthorized("invalid username or password"))
    }

    async fn list_users(&self) -> Result<Vec<UserProfile>, Error> {
        Ok(Vec::new())
    }

    async fn update_user(&self, id: i64, _patch: UserPatch) -> Result<UserProfile, Error> {
        Err(Error::not_found(format!("user {id} not found")))
    }

    async fn delete_user(&self, id: i64) -> Result<(), Error> {
        Err(Error::not_found(format!("user {id} not found")))
    }
}
