//! Stripe Payment Intent Client
//!
//! Thin reqwest wrapper over the `/v1/payment_intents` endpoint. Holds no
//! local state; the client secret goes straight back to the frontend.

use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, error};

use crate::shared::error::{BistroError, Result};

const DEFAULT_API_BASE: &str = "https://api.stripe.com";

/// Convert a decimal price in major currency units to integer minor units.
///
/// Truncates the fractional remainder, matching the processor's integer
/// amount contract: 25.00 -> 2500, 10.999 -> 1099.
pub fn to_minor_units(price: f64) -> i64 {
    (price * 100.0) as i64
}

#[derive(Debug, Deserialize)]
struct PaymentIntent {
    client_secret: String,
}

#[derive(Debug, Deserialize)]
struct StripeErrorBody {
    error: StripeErrorDetail,
}

#[derive(Debug, Deserialize)]
struct StripeErrorDetail {
    message: String,
}

/// Client for the payment processor API
#[derive(Clone)]
pub struct StripeClient {
    http: Client,
    secret_key: String,
    api_base: String,
}

impl StripeClient {
    pub fn new(secret_key: impl Into<String>) -> Self {
        Self::with_api_base(secret_key, DEFAULT_API_BASE)
    }

    /// Point the client at a non-default API base (sandboxes, tests)
    pub fn with_api_base(secret_key: impl Into<String>, api_base: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            secret_key: secret_key.into(),
            api_base: api_base.into(),
        }
    }

    /// Create a card payment intent for `amount_minor` cents and return its
    /// client secret.
    pub async fn create_payment_intent(&self, amount_minor: i64) -> Result<String> {
        let amount = amount_minor.to_string();
        let params = [
            ("amount", amount.as_str()),
            ("currency", "usd"),
            ("payment_method_types[]", "card"),
        ];

        let response = self
            .http
            .post(format!("{}/v1/payment_intents", self.api_base))
            .bearer_auth(&self.secret_key)
            .form(&params)
            .send()
            .await
            .map_err(|e| {
                error!("Payment processor request failed: {}", e);
                BistroError::payment_provider(format!("request failed: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let message = match response.json::<StripeErrorBody>().await {
                Ok(body) => body.error.message,
                Err(_) => format!("unexpected status {}", status),
            };
            error!(%status, "Payment processor rejected intent: {}", message);
            return Err(BistroError::payment_provider(message));
        }

        let intent: PaymentIntent = response.json().await.map_err(|e| {
            BistroError::payment_provider(format!("malformed response: {}", e))
        })?;

        debug!(amount_minor, "Payment intent created");
        Ok(intent.client_secret)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minor_units_exact() {
        assert_eq!(to_minor_units(25.00), 2500);
        assert_eq!(to_minor_units(0.0), 0);
    }

    #[test]
    fn test_minor_units_truncate() {
        assert_eq!(to_minor_units(10.999), 1099);
        assert_eq!(to_minor_units(19.99), 1998);
    }
}
