//! Driven port for the user store.

use async_trait::async_trait;

use crate::domain::User;

use super::define_port_error;

define_port_error! {
    /// Errors raised by user store adapters.
    pub enum UserRepositoryError {
        /// Store could not be reached or opened.
        Connection { message: String } =>
            "user store connection failed: {message}",
        /// Read or write failed during execution.
        Query { message: String } =>
            "user store query failed: {message}",
    }
}

/// Payload for inserting a user; the store assigns the identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    /// Unique login name.
    pub username: String,
    /// Salted SHA-256 digest of the password, hex encoded.
    pub password_digest: String,
    /// Authorisation role.
    pub role: crate::domain::Role,
    /// Display name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Contact phone number.
    pub phone: String,
    /// Registration instant.
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl NewUser {
    /// Materialise the user with a store-assigned identity.
    #[must_use]
    pub fn into_user(self, id: i64) -> User {
        User {
            id,
            username: self.username,
            password_digest: self.password_digest,
            role: self.role,
            name: self.name,
            email: self.email,
            phone: self.phone,
            created_at: self.created_at,
        }
    }
}

/// Port for reading and mutating user records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fetch a user by identity.
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, UserRepositoryError>;

    /// Fetch a user by unique login name.
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, UserRepositoryError>;

    /// All users in identity order.
    async fn list(&self) -> Result<Vec<User>, UserRepositoryError>;

    /// Insert a new record, assigning the next identity.
    async fn insert(&self, draft: NewUser) -> Result<User, UserRepositoryError>;

    /// Replace the record matching `user.id`; `false` when it is gone.
    async fn update(&self, user: &User) -> Result<bool, UserRepositoryError>;

    /// Delete a record; `false` when it was already gone.
    async fn delete(&self, id: i64) -> Result<bool, UserRepositoryError>;
}

/// Fixture implementation for tests that do not exercise the user store.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureUserRepository;

#[async_trait]
impl UserRepository for FixtureUserRepository {
    async fn find_by_id(&self, _id: i64) -> Result<Option<User>, UserRepositoryError> {
        Ok(None)
    }

    async fn find_by_username(&self, _username: &str) -> Result<Option<User>, UserRepositoryError> {
        Ok(None)
    }

    async fn list(&self) -> Result<Vec<User>, UserRepositoryError> {
        Ok(Vec::new())
    }

    async fn insert(&self, draft: NewUser) -> Result<User, UserRepositoryError> {
        Ok(draft.into_user(1))
    }

    async fn update(&self, _user: &User) -> Result<bool, UserRepositoryError> {
        Ok(false)
    }

    async fn delete(&self, _id: i64) -> Result<bool, UserRepositoryError> {
        Ok(false)
    }
}
