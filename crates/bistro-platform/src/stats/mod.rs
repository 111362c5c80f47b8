//! Analytics Aggregate
//!
//! Admin dashboard numbers derived from the payment history.

pub mod api;
pub mod repository;

// Re-export main types
pub use api::{stats_router, StatsState};
pub use repository::{CategoryStat, StatsRepository};
