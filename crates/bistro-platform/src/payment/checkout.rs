//! Checkout Unit of Work
//!
//! Recording a payment and emptying the paid-for cart lines must happen
//! together: a crash between the two would either charge without clearing
//! the cart or clear a cart that was never paid. Both writes run inside a
//! single MongoDB transaction.
//!
//! Requires a replica set deployment (multi-document transactions).

use mongodb::Client;
use serde::Serialize;
use tracing::{error, info};
use utoipa::ToSchema;

use crate::cart::repository::CartRepository;
use crate::payment::entity::Payment;
use crate::payment::repository::PaymentRepository;
use crate::shared::error::{BistroError, Result};

/// Outcome of a committed checkout
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutOutcome {
    /// ID of the recorded payment
    pub payment_id: String,

    /// Number of cart lines removed
    pub cart_lines_cleared: u64,
}

/// Transactional checkout over the payment and cart collections
#[derive(Clone)]
pub struct CheckoutService {
    client: Client,
    payment_repo: PaymentRepository,
    cart_repo: CartRepository,
}

impl CheckoutService {
    pub fn new(client: Client, payment_repo: PaymentRepository, cart_repo: CartRepository) -> Self {
        Self {
            client,
            payment_repo,
            cart_repo,
        }
    }

    /// Record `payment` and delete its cart lines atomically.
    ///
    /// On any failure the transaction is aborted and neither write persists.
    pub async fn record_payment(&self, payment: Payment) -> Result<CheckoutOutcome> {
        let mut session = self.client.start_session().await?;
        session.start_transaction().await?;

        let result = async {
            self.payment_repo
                .insert_in_session(&payment, &mut session)
                .await?;
            let cleared = self
                .cart_repo
                .delete_many_in_session(&payment.cart_id, &mut session)
                .await?;
            Ok::<u64, BistroError>(cleared)
        }
        .await;

        match result {
            Ok(cleared) => {
                session.commit_transaction().await?;
                info!(
                    payment_id = %payment.id,
                    email = %payment.email,
                    cart_lines_cleared = cleared,
                    "Checkout committed"
                );
                Ok(CheckoutOutcome {
                    payment_id: payment.id,
                    cart_lines_cleared: cleared,
                })
            }
            Err(e) => {
                error!(payment_id = %payment.id, "Checkout failed, aborting transaction: {}", e);
                if let Err(abort_err) = session.abort_transaction().await {
                    error!("Failed to abort checkout transaction: {}", abort_err);
                }
                Err(e)
            }
        }
    }
}
