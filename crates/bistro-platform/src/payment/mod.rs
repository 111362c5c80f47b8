//! Payment Aggregate
//!
//! Payment-intent bridge to the processor, transactional checkout, and
//! payment history.

pub mod api;
pub mod checkout;
pub mod entity;
pub mod repository;
pub mod stripe;

// Re-export main types
pub use api::{payments_router, PaymentState};
pub use checkout::{CheckoutOutcome, CheckoutService};
pub use entity::{Payment, PaymentRequest};
pub use repository::PaymentRepository;
pub use stripe::StripeClient;
