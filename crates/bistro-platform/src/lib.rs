//! Bistro Platform
//!
//! Backend for a single-restaurant ordering site:
//! - User accounts with a closed user/admin role model
//! - Menu catalogue with admin-managed dishes
//! - Customer reviews (read-only surface)
//! - Per-customer carts keyed by email
//! - Card payments via a processor payment-intent bridge
//! - Transactional checkout (record payment + clear cart atomically)
//! - Admin analytics over the payment history
//!
//! ## Module Organization (Aggregate-based)
//!
//! Each aggregate contains:
//! - `entity` - Domain entities
//! - `repository` - Data access
//! - `api` - REST endpoints

// Core aggregates
pub mod user;
pub mod menu;
pub mod review;
pub mod cart;
pub mod payment;
pub mod stats;

// Authentication
pub mod auth;

// Shared infrastructure
pub mod shared;

// Re-export common types from shared
pub use shared::error::{BistroError, Result};
pub use shared::tsid::TsidGenerator;

// Re-export main entity types for convenience
pub use cart::entity::{CartLine, CartLineInput};
pub use menu::entity::{MenuItem, MenuItemInput};
pub use payment::entity::{Payment, PaymentRequest};
pub use review::entity::Review;
pub use user::entity::{User, UserRole, UserView};

// Re-export repositories
pub use cart::repository::CartRepository;
pub use menu::repository::MenuRepository;
pub use payment::repository::PaymentRepository;
pub use review::repository::ReviewRepository;
pub use stats::repository::StatsRepository;
pub use user::repository::UserRepository;

// Re-export services
pub use auth::auth_service::{AuthConfig, AuthService, TokenClaims};
pub use auth::password_service::PasswordService;
pub use payment::checkout::CheckoutService;
pub use payment::stripe::StripeClient;

/// API surface re-exports
pub mod api {
    // Middleware
    pub use crate::shared::api_common::{ApiError, DeleteResponse, InsertResponse, UpdateResponse};
    pub use crate::shared::middleware::{AdminOnly, AppState, AuthLayer, Authenticated};

    // API state and router exports from each aggregate
    pub use crate::auth::auth_api::{token_router, TokenState};
    pub use crate::cart::api::{cart_router, CartState};
    pub use crate::menu::api::{menu_router, MenuState};
    pub use crate::payment::api::{payments_router, PaymentState};
    pub use crate::review::api::{reviews_router, ReviewState};
    pub use crate::stats::api::{stats_router, StatsState};
    pub use crate::user::api::{users_router, UsersState};

    // Shared APIs
    pub use crate::shared::health_api::{health_router, HealthState};
}
