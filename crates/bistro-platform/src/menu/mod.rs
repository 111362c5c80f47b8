//! Menu Aggregate
//!
//! The restaurant catalogue: dishes, their categories, and prices.

pub mod api;
pub mod entity;
pub mod repository;

// Re-export main types
pub use api::{menu_router, MenuState};
pub use entity::{MenuItem, MenuItemInput};
pub use repository::MenuRepository;
