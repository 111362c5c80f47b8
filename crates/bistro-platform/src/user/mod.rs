//! User Aggregate
//!
//! Accounts, roles, and the admin management surface.

pub mod api;
pub mod entity;
pub mod repository;

// Re-export main types
pub use api::{users_router, UsersState};
pub use entity::{User, UserRole, UserView};
pub use repository::UserRepository;
