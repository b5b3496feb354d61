//! Account services: registration, login, and user administration.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use sha2::{Digest, Sha256};
use tracing::info;

use crate::domain::ports::{
    AccountsService, Credentials, NewUser, RegisterRequest, UserPatch, UserRepository,
    UserRepositoryError,
};
use crate::domain::{Error, Role, UserProfile};

// Application-wide salt for password digests. Changing it invalidates every
// stored credential.
const PASSWORD_SALT: &str = "circulation-backend-salt-v1";

/// Salted SHA-256 digest of a password, hex encoded.
#[must_use]
pub fn password_digest(password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    hasher.update(PASSWORD_SALT.as_bytes());
    hex::encode(hasher.finalize())
}

fn map_user_error(error: UserRepositoryError) -> Error {
    Error::internal(format!("user store failure: {error}"))
}

/// Account use-cases over the user store.
pub struct AccountDirectory<U> {
    user_repo: Arc<U>,
    clock: Arc<dyn Clock>,
}

impl<U> AccountDirectory<U> {
    /// Create the directory over its store and clock.
    pub fn new(user_repo: Arc<U>, clock: Arc<dyn Clock>) -> Self {
        Self { user_repo, clock }
    }
}

#[async_trait]
impl<U> AccountsService for AccountDirectory<U>
where
    U: UserRepository,
{
    async fn register(&self, request: RegisterRequest) -> Result<UserProfile, Error> {
        if request.username.trim().is_empty() {
            return Err(Error::invalid_request("username must not be empty"));
        }
        if request.password.is_empty() {
            return Err(Error::invalid_request("password must not be empty"));
        }
        let duplicate = self
            .user_repo
            .find_by_username(&request.username)
            .await
            .map_err(map_user_error)?;
        if duplicate.is_some() {
            return Err(Error::conflict(format!(
                "username {} is already registered",
                request.username
            )));
        }

        let user = self
            .user_repo
            .insert(NewUser {
                username: request.username,
                password_digest: password_digest(&request.password),
                role: Role::Member,
                name: request.name,
                email: request.email,
                phone: request.phone,
                created_at: self.clock.utc(),
            })
            .await
            .map_err(map_user_error)?;
        info!(user_id = user.id, username = %user.username, "user registered");
        Ok(user.profile())
    }

    async fn login(&self, credentials: Credentials) -> Result<UserProfile, Error> {
        let user = self
            .user_repo
            .find_by_username(&credentials.username)
            .await
            .map_err(map_user_error)?
            .ok_or_else(|| Error::unauthorized("user does not exist"))?;
        if user.password_digest != password_digest(&credentials.password) {
            return Err(Error::unauthorized("wrong password"));
        }
        Ok(user.profile())
    }

    async fn list_users(&self) -> Result<Vec<UserProfile>, Error> {
        let users = self.user_repo.list().await.map_err(map_user_error)?;
        Ok(users.iter().map(crate::domain::User::profile).collect())
    }

    async fn update_user(&self, id: i64, patch: UserPatch) -> Result<UserProfile, Error> {
        let mut user = self
            .user_repo
            .find_by_id(id)
            .await
            .map_err(map_user_error)?
            .ok_or_else(|| Error::not_found(format!("user {id} not found")))?;

        if let Some(name) = patch.name {
            user.name = name;
        }
        if let Some(email) = patch.email {
            user.email = email;
        }
        if let Some(phone) = patch.phone {
            user.phone = phone;
        }
        if let Some(role) = patch.role {
            user.role = role;
        }
        // An empty password means "leave the credential alone".
        if let Some(password) = patch.password.filter(|password| !password.is_empty()) {
            user.password_digest = password_digest(&password);
        }

        let updated = self.user_repo.update(&user).await.map_err(map_user_error)?;
        if !updated {
            return Err(Error::not_found(format!("user {id} not found")));
        }
        Ok(user.profile())
    }

    async fn delete_user(&self, id: i64) -> Result<(), Error> {
        let user = self
            .user_repo
            .find_by_id(id)
            .await
            .map_err(map_user_error)?
            .ok_or_else(|| Error::not_found(format!("user {id} not found")))?;
        if user.role == Role::Admin {
            return Err(Error::conflict("administrators cannot be deleted"));
        }
        let deleted = self.user_repo.delete(id).await.map_err(map_user_error)?;
        if !deleted {
            return Err(Error::not_found(format!("user {id} not found")));
        }
        info!(user_id = id, "user deleted");
        Ok(())
    }
}

#[cfg(test)]
#[path = "accounts_tests.rs"]
mod tests;
