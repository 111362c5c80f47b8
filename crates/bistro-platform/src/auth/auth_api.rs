//! Token Issuance API
//!
//! `POST /jwt` - mint a session token for a registered user.
//!
//! The original frontend contract posts an identity claim and receives a
//! signed token back. Unlike that contract, issuance here is authenticated:
//! the email must belong to a stored user, and when that user registered
//! with a password the password must verify before anything is signed.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;
use utoipa::ToSchema;
use utoipa_axum::{router::OpenApiRouter, routes};

use crate::auth::auth_service::AuthService;
use crate::auth::password_service::PasswordService;
use crate::shared::error::BistroError;
use crate::user::repository::UserRepository;

/// Token request
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TokenRequest {
    /// Email address of a registered user
    pub email: String,

    /// Password, required when the account has one stored
    pub password: Option<String>,
}

/// Token response
#[derive(Debug, Serialize, ToSchema)]
pub struct TokenResponse {
    pub token: String,
}

/// Token service state
#[derive(Clone)]
pub struct TokenState {
    pub auth_service: Arc<AuthService>,
    pub password_service: Arc<PasswordService>,
    pub user_repo: Arc<UserRepository>,
}

/// Issue a session token
///
/// Authenticates the claimed identity against the user store and returns a
/// signed one-hour token.
#[utoipa::path(
    post,
    path = "",
    tag = "auth",
    operation_id = "postJwt",
    request_body = TokenRequest,
    responses(
        (status = 200, description = "Token issued", body = TokenResponse),
        (status = 401, description = "Unknown identity or bad password")
    )
)]
pub async fn issue_token(
    State(state): State<TokenState>,
    Json(req): Json<TokenRequest>,
) -> Result<Json<TokenResponse>, BistroError> {
    let user = state
        .user_repo
        .find_by_email(&req.email)
        .await?
        .ok_or(BistroError::InvalidCredentials)?;

    // Accounts created through the social-login flow have no stored password;
    // for those the existence check above is the whole gate.
    if let Some(ref hash) = user.password_hash {
        let password = req.password.as_deref().ok_or(BistroError::InvalidCredentials)?;
        if !state.password_service.verify_password(password, hash)? {
            return Err(BistroError::InvalidCredentials);
        }
    }

    let token = state.auth_service.issue_token(&user)?;
    info!(email = %user.email, "Session token issued");

    Ok(Json(TokenResponse { token }))
}

/// Create the token issuance router
pub fn token_router(state: TokenState) -> OpenApiRouter {
    OpenApiRouter::new()
        .routes(routes!(issue_token))
        .with_state(state)
}
