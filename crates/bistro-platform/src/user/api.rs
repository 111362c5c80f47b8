//! User Management API
//!
//! Registration plus the admin-facing account operations.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;
use utoipa::ToSchema;
use utoipa_axum::{router::OpenApiRouter, routes};

use crate::auth::password_service::PasswordService;
use crate::shared::api_common::{DeleteResponse, UpdateResponse};
use crate::shared::error::BistroError;
use crate::shared::middleware::{AdminOnly, Authenticated};
use crate::user::entity::{User, UserRole, UserView};
use crate::user::repository::UserRepository;

/// User service state
#[derive(Clone)]
pub struct UsersState {
    pub user_repo: Arc<UserRepository>,
    pub password_service: Arc<PasswordService>,
}

/// Registration request
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: String,
    pub name: String,

    /// Absent for social-login registrations
    pub password: Option<String>,
}

/// Registration outcome. Duplicate registrations are reported in the body
/// rather than by status code, which keeps the social-login flow (register
/// on every sign-in) a single unconditional call for clients.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub inserted_id: Option<String>,
}

/// Admin check response
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminCheckResponse {
    pub is_admin: bool,
}

/// Register a user
///
/// Idempotent on email: a second registration for the same address returns
/// the duplicate sentinel instead of inserting.
#[utoipa::path(
    post,
    path = "",
    tag = "users",
    operation_id = "registerUser",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "User created, or duplicate sentinel", body = RegisterResponse),
        (status = 400, description = "Validation failure")
    )
)]
pub async fn register_user(
    State(state): State<UsersState>,
    Json(req): Json<RegisterRequest>,
) -> Result<Json<RegisterResponse>, BistroError> {
    if req.email.is_empty() {
        return Err(BistroError::validation("email must not be empty"));
    }

    if state.user_repo.find_by_email(&req.email).await?.is_some() {
        return Ok(Json(RegisterResponse {
            message: Some("user already exists".to_string()),
            inserted_id: None,
        }));
    }

    let mut user = User::new(&req.email, &req.name);
    if let Some(ref password) = req.password {
        let hash = state.password_service.hash_password(password)?;
        user = user.with_password_hash(hash);
    }

    state.user_repo.insert(&user).await?;
    info!(user_id = %user.id, email = %user.email, "User registered");

    Ok(Json(RegisterResponse {
        message: None,
        inserted_id: Some(user.id),
    }))
}

/// List all users (admin)
///
/// Returns account views; stored password hashes stay in the collection.
#[utoipa::path(
    get,
    path = "",
    tag = "users",
    operation_id = "listUsers",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All users", body = [UserView]),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Caller is not an admin")
    )
)]
pub async fn list_users(
    AdminOnly(_claims): AdminOnly,
    State(state): State<UsersState>,
) -> Result<Json<Vec<UserView>>, BistroError> {
    let users = state.user_repo.find_all().await?;
    Ok(Json(users.into_iter().map(UserView::from).collect()))
}

/// Check whether an account is an admin
///
/// A caller may only ask about their own email; the answer for an unknown
/// email is simply `false`.
#[utoipa::path(
    get,
    path = "/admin/{id}",
    tag = "users",
    operation_id = "checkAdmin",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Email address to check")),
    responses(
        (status = 200, description = "Admin flag", body = AdminCheckResponse),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Asking about someone else's account")
    )
)]
pub async fn check_admin(
    Authenticated(claims): Authenticated,
    State(state): State<UsersState>,
    Path(email): Path<String>,
) -> Result<Json<AdminCheckResponse>, BistroError> {
    if claims.email != email {
        return Err(BistroError::forbidden("forbidden access"));
    }

    let is_admin = state
        .user_repo
        .find_by_email(&email)
        .await?
        .map(|u| u.is_admin())
        .unwrap_or(false);

    Ok(Json(AdminCheckResponse { is_admin }))
}

/// Promote a user to admin
#[utoipa::path(
    patch,
    path = "/admin/{id}",
    tag = "users",
    operation_id = "promoteUser",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "User ID")),
    responses(
        (status = 200, description = "Update counts", body = UpdateResponse),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Caller is not an admin")
    )
)]
pub async fn promote_user(
    AdminOnly(_claims): AdminOnly,
    State(state): State<UsersState>,
    Path(id): Path<String>,
) -> Result<Json<UpdateResponse>, BistroError> {
    let (matched, modified) = state.user_repo.set_role(&id, UserRole::Admin).await?;
    if matched > 0 {
        info!(user_id = %id, "User promoted to admin");
    }
    Ok(Json(UpdateResponse {
        matched_count: matched,
        modified_count: modified,
    }))
}

/// Delete a user (admin)
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "users",
    operation_id = "deleteUser",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "User ID")),
    responses(
        (status = 200, description = "Delete count", body = DeleteResponse),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Caller is not an admin")
    )
)]
pub async fn delete_user(
    AdminOnly(_claims): AdminOnly,
    State(state): State<UsersState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>, BistroError> {
    let deleted = state.user_repo.delete(&id).await?;
    if deleted > 0 {
        info!(user_id = %id, "User deleted");
    }
    Ok(Json(DeleteResponse { deleted_count: deleted }))
}

/// Create the users router
pub fn users_router(state: UsersState) -> OpenApiRouter {
    OpenApiRouter::new()
        .routes(routes!(register_user, list_users))
        // GET and PATCH share /admin/{id}; one call keeps axum from seeing
        // conflicting registrations for the same path.
        .routes(routes!(check_admin, promote_user))
        .routes(routes!(delete_user))
        .with_state(state)
}
