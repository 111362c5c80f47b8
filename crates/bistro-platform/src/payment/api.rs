//! Payments API
//!
//! Payment-intent creation, transactional checkout, and per-customer
//! payment history.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;
use utoipa_axum::{router::OpenApiRouter, routes};

use crate::payment::checkout::CheckoutService;
use crate::payment::entity::{Payment, PaymentRequest};
use crate::payment::repository::PaymentRepository;
use crate::payment::stripe::{to_minor_units, StripeClient};
use crate::shared::api_common::{DeleteResponse, InsertResponse};
use crate::shared::error::BistroError;
use crate::shared::middleware::Authenticated;

/// Payment service state
#[derive(Clone)]
pub struct PaymentState {
    pub stripe: Arc<StripeClient>,
    pub checkout: Arc<CheckoutService>,
    pub payment_repo: Arc<PaymentRepository>,
}

/// Payment intent request
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentIntentRequest {
    /// Cart total in major currency units
    pub total_price: f64,
}

/// Payment intent response
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentIntentResponse {
    pub client_secret: String,
}

/// Checkout response: the recorded payment plus the cart cleanup count
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutResponse {
    pub payment_result: InsertResponse,
    pub delete_result: DeleteResponse,
}

/// Create a payment intent
///
/// Converts the cart total to minor units (truncating) and asks the
/// processor for a card intent.
#[utoipa::path(
    post,
    path = "/create-payment-intent",
    tag = "payments",
    operation_id = "createPaymentIntent",
    request_body = PaymentIntentRequest,
    responses(
        (status = 200, description = "Client secret for the intent", body = PaymentIntentResponse),
        (status = 400, description = "Non-positive total"),
        (status = 502, description = "Processor unavailable or rejected the intent")
    )
)]
pub async fn create_payment_intent(
    State(state): State<PaymentState>,
    Json(req): Json<PaymentIntentRequest>,
) -> Result<Json<PaymentIntentResponse>, BistroError> {
    let amount = to_minor_units(req.total_price);
    if amount <= 0 {
        return Err(BistroError::validation("totalPrice must be positive"));
    }

    let client_secret = state.stripe.create_payment_intent(amount).await?;
    Ok(Json(PaymentIntentResponse { client_secret }))
}

/// Record a payment and clear the cart
///
/// Single transactional unit: the payment insert and the cart-line deletes
/// commit together or not at all.
#[utoipa::path(
    post,
    path = "/payments",
    tag = "payments",
    operation_id = "recordPayment",
    security(("bearer_auth" = [])),
    request_body = PaymentRequest,
    responses(
        (status = 200, description = "Payment recorded, cart cleared", body = CheckoutResponse),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Paying for someone else's cart")
    )
)]
pub async fn record_payment(
    Authenticated(claims): Authenticated,
    State(state): State<PaymentState>,
    Json(req): Json<PaymentRequest>,
) -> Result<Json<CheckoutResponse>, BistroError> {
    if claims.email != req.email {
        return Err(BistroError::forbidden("forbidden access"));
    }

    let payment = Payment::from_request(req);
    let outcome = state.checkout.record_payment(payment).await?;

    Ok(Json(CheckoutResponse {
        payment_result: InsertResponse::new(outcome.payment_id),
        delete_result: DeleteResponse {
            deleted_count: outcome.cart_lines_cleared,
        },
    }))
}

/// Payment history for one customer
///
/// Callers may only read their own history.
#[utoipa::path(
    get,
    path = "/payments/{email}",
    tag = "payments",
    operation_id = "listPayments",
    security(("bearer_auth" = [])),
    params(("email" = String, Path, description = "Customer email")),
    responses(
        (status = 200, description = "Payments for the email", body = [Payment]),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Asking for someone else's history")
    )
)]
pub async fn list_payments(
    Authenticated(claims): Authenticated,
    State(state): State<PaymentState>,
    Path(email): Path<String>,
) -> Result<Json<Vec<Payment>>, BistroError> {
    if claims.email != email {
        return Err(BistroError::forbidden("forbidden access"));
    }

    let payments = state.payment_repo.find_by_email(&email).await?;
    Ok(Json(payments))
}

/// Create the payments router (mounted at the API root)
pub fn payments_router(state: PaymentState) -> OpenApiRouter {
    OpenApiRouter::new()
        .routes(routes!(create_payment_intent))
        .routes(routes!(record_payment))
        .routes(routes!(list_payments))
        .with_state(state)
}
