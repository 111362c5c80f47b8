//! Shared infrastructure for the bistro services.

pub mod logging;
