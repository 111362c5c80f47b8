//! Review Aggregate

pub mod api;
pub mod entity;
pub mod repository;

// Re-export main types
pub use api::{reviews_router, ReviewState};
pub use entity::Review;
pub use repository::ReviewRepository;
