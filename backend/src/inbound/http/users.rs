//! Account and user administration HTTP handlers.
//!
//! ```text
//! POST   /api/auth/register
//! POST   /api/auth/login
//! GET    /api/users
//! PUT    /api/users/{id}
//! DELETE /api/users/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::{Credentials, RegisterRequest, UserPatch};
use crate::domain::{Error, Role, UserProfile};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// Registration payload.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterBody {
    /// Requested login name.
    pub username: String,
    /// Plaintext password, digested before storage.
    pub password: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Contact email.
    #[serde(default)]
    pub email: String,
    /// Contact phone number.
    #[serde(default)]
    pub phone: String,
}

/// Login payload.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginBody {
    /// Login name.
    pub username: String,
    /// Plaintext password.
    pub password: String,
}

/// Field-level merge payload for a user update.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserBody {
    /// New display name.
    pub name: Option<String>,
    /// New contact email.
    pub email: Option<String>,
    /// New contact phone number.
    pub phone: Option<String>,
    /// New authorisation role.
    pub role: Option<Role>,
    /// New plaintext password; empty leaves the credential alone.
    pub password: Option<String>,
}

/// Register a member account.
#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterBody,
    responses(
        (status = 200, description = "Registered profile", body = UserProfile),
        (status = 400, description = "Username taken or invalid payload", body = Error)
    ),
    tags = ["accounts"],
    operation_id = "register"
)]
#[post("/auth/register")]
pub async fn register(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterBody>,
) -> ApiResult<web::Json<UserProfile>> {
    let body = payload.into_inner();
    let profile = state
        .accounts
        .register(RegisterRequest {
            username: body.username,
            password: body.password,
            name: body.name,
            email: body.email,
            phone: body.phone,
        })
        .await?;
    Ok(web::Json(profile))
}

/// Verify credentials and return the profile.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginBody,
    responses(
        (status = 200, description = "Authenticated profile", body = UserProfile),
        (status = 401, description = "Unknown user or wrong password", body = Error)
    ),
    tags = ["accounts"],
    operation_id = "login"
)]
#[post("/auth/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<LoginBody>,
) -> ApiResult<web::Json<UserProfile>> {
    let body = payload.into_inner();
    let profile = state
        .accounts
        .login(Credentials {
            username: body.username,
            password: body.password,
        })
        .await?;
    Ok(web::Json(profile))
}

/// List sanitised user profiles.
#[utoipa::path(
    get,
    path = "/api/users",
    responses((status = 200, description = "Registered users", body = [UserProfile])),
    tags = ["accounts"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<UserProfile>>> {
    let profiles = state.accounts.list_users().await?;
    Ok(web::Json(profiles))
}

/// Merge changes into a user record.
#[utoipa::path(
    put,
    path = "/api/users/{id}",
    params(("id" = i64, Path, description = "User identity")),
    request_body = UpdateUserBody,
    responses(
        (status = 200, description = "Updated profile", body = UserProfile),
        (status = 404, description = "User not found", body = Error)
    ),
    tags = ["accounts"],
    operation_id = "updateUser"
)]
#[put("/users/{id}")]
pub async fn update_user(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
    payload: web::Json<UpdateUserBody>,
) -> ApiResult<web::Json<UserProfile>> {
    let body = payload.into_inner();
    let profile = state
        .accounts
        .update_user(
            path.into_inner(),
            UserPatch {
                name: body.name,
                email: body.email,
                phone: body.phone,
                role: body.role,
                password: body.password,
            },
        )
        .await?;
    Ok(web::Json(profile))
}

/// Delete a non-admin user.
#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    params(("id" = i64, Path, description = "User identity")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 400, description = "Administrators cannot be deleted", body = Error),
        (status = 404, description = "User not found", body = Error)
    ),
    tags = ["accounts"],
    operation_id = "deleteUser"
)]
#[delete("/users/{id}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    state.accounts.delete_user(path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
#[path = "users_tests.rs"]
mod tests;
