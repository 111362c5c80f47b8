//! API Middleware
//!
//! Authentication and authorization extractors for Axum.
//!
//! Guard ordering is structural: `Authenticated` validates the bearer token
//! and nothing else; `AdminOnly` runs that same validation first and then
//! resolves the caller's stored role with a fresh collection read. Roles are
//! never cached between requests, so a promotion or demotion takes effect on
//! the next call.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, StatusCode, HeaderValue},
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;
use crate::auth::auth_service::{extract_bearer_token, AuthService, TokenClaims};
use crate::shared::api_common::ApiError;
use crate::user::entity::{User, UserRole};
use crate::user::repository::UserRepository;

/// Application state containing shared services
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<AuthService>,
    pub user_repo: Arc<UserRepository>,
}

/// Authenticated caller extractor.
/// Validates the bearer token and exposes the decoded claims.
#[derive(Debug)]
pub struct Authenticated(pub TokenClaims);

impl std::ops::Deref for Authenticated {
    type Target = TokenClaims;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Administrator extractor.
/// Validates the bearer token, then requires the stored user record for the
/// verified email to carry the admin role.
#[derive(Debug)]
pub struct AdminOnly(pub TokenClaims);

impl std::ops::Deref for AdminOnly {
    type Target = TokenClaims;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Error response for authentication and authorization failures
#[derive(Debug)]
pub struct AuthError {
    pub status: StatusCode,
    pub message: String,
}

impl AuthError {
    fn unauthorized(message: impl Into<String>) -> Self {
        Self { status: StatusCode::UNAUTHORIZED, message: message.into() }
    }

    fn forbidden(message: impl Into<String>) -> Self {
        Self { status: StatusCode::FORBIDDEN, message: message.into() }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let error = match self.status {
            StatusCode::FORBIDDEN => "FORBIDDEN",
            _ => "UNAUTHORIZED",
        };
        let body = ApiError {
            error: error.to_string(),
            message: self.message,
        };
        (self.status, Json(body)).into_response()
    }
}

/// Validate the bearer token from the Authorization header.
fn validate_bearer(parts: &Parts, state: &AppState) -> Result<TokenClaims, AuthError> {
    let token = parts.headers
        .get(AUTHORIZATION)
        .and_then(|v: &HeaderValue| v.to_str().ok())
        .and_then(extract_bearer_token)
        .ok_or_else(|| AuthError::unauthorized("Missing authentication token"))?;

    state.auth_service
        .validate_token(token)
        .map_err(|e| AuthError::unauthorized(e.to_string()))
}

/// Admission decision for admin routes. Unknown accounts and non-admin
/// roles read the same from outside: forbidden.
fn require_admin(user: Option<&User>) -> Result<(), AuthError> {
    match user {
        Some(user) if user.role == UserRole::Admin => Ok(()),
        _ => Err(AuthError::forbidden("forbidden access")),
    }
}

fn app_state(parts: &Parts) -> Result<AppState, AuthError> {
    parts.extensions.get::<AppState>().cloned().ok_or_else(|| AuthError {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        message: "Auth service not configured".to_string(),
    })
}

#[async_trait]
impl<S> FromRequestParts<S> for Authenticated
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let state = app_state(parts)?;
        let claims = validate_bearer(parts, &state)?;
        Ok(Authenticated(claims))
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AdminOnly
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let state = app_state(parts)?;

        // Identity first, role second.
        let claims = validate_bearer(parts, &state)?;

        let user = state.user_repo
            .find_by_email(&claims.email)
            .await
            .map_err(|e| AuthError {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                message: e.to_string(),
            })?;

        require_admin(user.as_ref())?;
        Ok(AdminOnly(claims))
    }
}

/// Middleware layer that injects AppState into request extensions.
/// This enables the Authenticated and AdminOnly extractors to work.
use tower::Layer;
use tower::Service;
use std::task::{Context, Poll};
use std::future::Future;
use std::pin::Pin;

#[derive(Clone)]
pub struct AuthLayer {
    state: AppState,
}

impl AuthLayer {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl<S> Layer<S> for AuthLayer {
    type Service = AuthMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        AuthMiddleware {
            inner,
            state: self.state.clone(),
        }
    }
}

#[derive(Clone)]
pub struct AuthMiddleware<S> {
    inner: S,
    state: AppState,
}

impl<S, B> Service<axum::http::Request<B>> for AuthMiddleware<S>
where
    S: Service<axum::http::Request<B>, Response = Response> + Send + Clone + 'static,
    S::Future: Send + 'static,
    B: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: axum::http::Request<B>) -> Self::Future {
        req.extensions_mut().insert(self.state.clone());

        let future = self.inner.call(req);
        Box::pin(async move { future.await })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_admin_user_is_forbidden() {
        let user = User::new("diner@example.com", "Diner");
        let err = require_admin(Some(&user)).unwrap_err();
        assert_eq!(err.status, StatusCode::FORBIDDEN);
        assert_eq!(err.message, "forbidden access");
    }

    #[test]
    fn test_unknown_account_is_forbidden() {
        // A valid token whose email has no stored account gets 403, not 401.
        let err = require_admin(None).unwrap_err();
        assert_eq!(err.status, StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_admin_user_passes() {
        let mut user = User::new("boss@example.com", "Boss");
        user.role = UserRole::Admin;
        assert!(require_admin(Some(&user)).is_ok());
    }

    #[test]
    fn test_forbidden_maps_to_403_response() {
        let response = AuthError::forbidden("forbidden access").into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_unauthorized_maps_to_401_response() {
        let response = AuthError::unauthorized("Missing authentication token").into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
