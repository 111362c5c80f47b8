//! Cart Aggregate
//!
//! Per-customer cart lines, keyed by email, emptied by checkout.

pub mod api;
pub mod entity;
pub mod repository;

// Re-export main types
pub use api::{cart_router, CartState};
pub use entity::{CartLine, CartLineInput};
pub use repository::CartRepository;
