//! Shared Module
//!
//! Cross-cutting concerns and shared utilities.

pub mod error;
pub mod tsid;
pub mod middleware;
pub mod api_common;
pub mod health_api;

// Re-export commonly used items
pub use error::{BistroError, Result};
pub use tsid::TsidGenerator;
pub use middleware::{AdminOnly, AppState, Authenticated};
pub use api_common::{DeleteResponse, InsertResponse, UpdateResponse};
pub use health_api::{health_router, HealthState};
