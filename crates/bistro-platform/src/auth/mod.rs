//! Authentication Aggregate
//!
//! Session token issuance/validation and password hashing.

pub mod auth_service;
pub mod auth_api;
pub mod password_service;

// Re-export main types
pub use auth_api::{token_router, TokenState};
pub use auth_service::{AuthConfig, AuthService, TokenClaims};
pub use password_service::PasswordService;
